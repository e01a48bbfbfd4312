//! Конфигурация компаса: магнитное склонение и параметры расчета курса

use crate::data::Mounting;
use crate::utils::math::deg_min_to_rad;

/// Магнитное склонение по умолчанию (градусы, минуты)
///
/// Харрогейт, Великобритания: -1°13'. Уточнить для своего региона
/// на magnetic-declination.com
pub const DEFAULT_DECLINATION: (i16, u8) = (-1, 13);

/// Ориентация датчика на плате
pub const MOUNTING: Mounting = Mounting::Horizontal;

/// Период опроса магнитометра (мс)
pub const SAMPLE_PERIOD_MS: u64 = 500;

/// Магнитное склонение
///
/// Задается в градусах и минутах дуги, хранится в радианах. Градусы могут быть
/// отрицательными (западное склонение), минуты всегда неотрицательны и
/// прибавляются к градусам: `(-1, 13)` дает -0.7833°.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Declination {
    radians: f64,
}

impl Declination {
    /// Нулевое склонение
    pub const ZERO: Self = Self { radians: 0.0 };

    /// Склонение из градусов и минут
    pub fn new(degrees: i16, minutes: u8) -> Self {
        Self {
            radians: deg_min_to_rad(degrees, minutes),
        }
    }

    /// Склонение из дробного числа градусов
    pub fn from_degrees(degrees: f64) -> Self {
        Self {
            radians: degrees.to_radians(),
        }
    }

    /// Склонение в радианах
    pub fn radians(&self) -> f64 {
        self.radians
    }

    /// Склонение в градусах
    pub fn degrees(&self) -> f64 {
        self.radians.to_degrees()
    }
}

impl Default for Declination {
    fn default() -> Self {
        let (degrees, minutes) = DEFAULT_DECLINATION;
        Self::new(degrees, minutes)
    }
}

impl From<(i16, u8)> for Declination {
    fn from((degrees, minutes): (i16, u8)) -> Self {
        Self::new(degrees, minutes)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Declination {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}°", self.degrees())
    }
}
