#[macro_use]
#[allow(unused_macros)]
pub(crate) mod logging;
pub mod math;
