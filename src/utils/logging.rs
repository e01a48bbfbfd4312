//! Макросы журналирования
//!
//! С feature `defmt` сообщения уходят в defmt, в тестах печатаются в stdout,
//! иначе аргументы вычисляются и отбрасываются.

macro_rules! log_info {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($s $(, $x)*);

        #[cfg(all(not(feature = "defmt"), test))]
        ::std::println!(concat!("[INFO] ", $s) $(, $x)*);

        #[cfg(not(any(feature = "defmt", test)))]
        let _ = ($(&$x,)*);
    }};
}

macro_rules! log_warn {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($s $(, $x)*);

        #[cfg(all(not(feature = "defmt"), test))]
        ::std::println!(concat!("[WARN] ", $s) $(, $x)*);

        #[cfg(not(any(feature = "defmt", test)))]
        let _ = ($(&$x,)*);
    }};
}

macro_rules! log_debug {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($s $(, $x)*);

        #[cfg(all(not(feature = "defmt"), test))]
        ::std::println!(concat!("[DEBUG] ", $s) $(, $x)*);

        #[cfg(not(any(feature = "defmt", test)))]
        let _ = ($(&$x,)*);
    }};
}

macro_rules! log_trace {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($s $(, $x)*);

        #[cfg(all(not(feature = "defmt"), test))]
        ::std::println!(concat!("[TRACE] ", $s) $(, $x)*);

        #[cfg(not(any(feature = "defmt", test)))]
        let _ = ($(&$x,)*);
    }};
}
