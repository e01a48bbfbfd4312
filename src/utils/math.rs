//! Математические функции и утилиты

use core::f64::consts::{PI, TAU};

/// Преобразование беззнакового значения разрядности `bits` в знаковое
/// (дополнительный код)
///
/// Если установлен старший бит (`bits - 1`), из значения вычитается `2^bits`.
/// Допустимая разрядность: 1..=32.
#[inline]
pub fn twos_complement(value: u32, bits: u32) -> i32 {
    debug_assert!((1..=32).contains(&bits));
    let value = value as i64;
    if value & (1 << (bits - 1)) != 0 {
        (value - (1i64 << bits)) as i32
    } else {
        value as i32
    }
}

/// Сборка 16-битного знакового значения из двух байт регистров
#[inline]
pub fn word_to_i16(high: u8, low: u8) -> i32 {
    twos_complement(u16::from_be_bytes([high, low]) as u32, 16)
}

/// Однократный перенос угла в диапазон [0, 2π)
///
/// Угол должен отстоять от диапазона не более чем на один оборот.
#[inline]
pub fn wrap_once_positive(angle: f64) -> f64 {
    if angle < 0.0 {
        angle + TAU
    } else if angle >= TAU {
        angle - TAU
    } else {
        angle
    }
}

/// Преобразование радиан в градусы курса [0, 360)
#[inline]
pub fn heading_degrees(angle_rad: f64) -> f64 {
    let degrees = angle_rad * 180.0 / PI;
    // -ε + 2π округляется до 360
    if degrees >= 360.0 {
        degrees - 360.0
    } else {
        degrees
    }
}

/// Градусы и минуты дуги в радианы
#[inline]
pub fn deg_min_to_rad(degrees: i16, minutes: u8) -> f64 {
    (degrees as f64 + minutes as f64 / 60.0) * PI / 180.0
}

/// Округление до заданного числа знаков после запятой
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = libm::pow(10.0, decimals as f64);
    libm::round(value * factor) / factor
}

// Модульные тесты
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twos_complement() {
        assert_eq!(twos_complement(0x0000, 16), 0);
        assert_eq!(twos_complement(0x7FFF, 16), 32767);
        assert_eq!(twos_complement(0x8000, 16), -32768);
        assert_eq!(twos_complement(0xFFFF, 16), -1);
        assert_eq!(twos_complement(0xF000, 16), -4096);
        assert_eq!(twos_complement(0b1000, 4), -8);
        assert_eq!(twos_complement(0b0111, 4), 7);
        assert_eq!(twos_complement(0xFFFF_FFFF, 32), -1);
    }

    #[test]
    fn test_word_to_i16() {
        assert_eq!(word_to_i16(0x01, 0x02), 258);
        assert_eq!(word_to_i16(0xFF, 0xFE), -2);
    }

    #[test]
    fn test_wrap_once_positive() {
        assert_eq!(wrap_once_positive(0.0), 0.0);
        assert!((wrap_once_positive(-0.5) - (TAU - 0.5)).abs() < 1e-12);
        assert!((wrap_once_positive(TAU + 0.25) - 0.25).abs() < 1e-12);
        assert_eq!(wrap_once_positive(TAU), 0.0);
    }

    #[test]
    fn test_heading_degrees() {
        assert!((heading_degrees(PI) - 180.0).abs() < 1e-12);
        assert!((0.0..360.0).contains(&heading_degrees(TAU)));
        let almost_full = heading_degrees(wrap_once_positive(-1e-17));
        assert!((0.0..360.0).contains(&almost_full));
    }

    #[test]
    fn test_deg_min_to_rad() {
        assert!((deg_min_to_rad(180, 0) - PI).abs() < 1e-12);
        assert!((deg_min_to_rad(0, 30) - 0.5f64.to_radians()).abs() < 1e-12);
        let expected = (-1.0 + 13.0 / 60.0) * PI / 180.0;
        assert!((deg_min_to_rad(-1, 13) - expected).abs() < 1e-15);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.234_56, 4), 1.2346);
        assert_eq!(round_to(-0.92, 4), -0.92);
    }
}
