// src/data/mod.rs
use nalgebra::Vector3;

/// Показания по трем осям (X, Y, Z)
pub type Axes = Vector3<f64>;

/// Компасный курс в градусах [0, 360)
pub type Heading = f64;

/// Сырое показание магнитометра
///
/// Ось равна `None`, если датчик сообщил о недействительном значении
/// (например, переполнение АЦП).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisSample {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

impl AxisSample {
    pub const fn new(x: Option<f64>, y: Option<f64>, z: Option<f64>) -> Self {
        Self { x, y, z }
    }

    /// Показание без единой действительной оси
    pub const fn invalid() -> Self {
        Self::new(None, None, None)
    }

    /// Все три оси, если ни одна не пропущена
    pub fn complete(&self) -> Option<Axes> {
        Some(Axes::new(self.x?, self.y?, self.z?))
    }

    pub fn is_complete(&self) -> bool {
        self.complete().is_some()
    }
}

impl From<Axes> for AxisSample {
    fn from(axes: Axes) -> Self {
        Self::new(Some(axes.x), Some(axes.y), Some(axes.z))
    }
}

impl From<(f64, f64, f64)> for AxisSample {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(Some(x), Some(y), Some(z))
    }
}

impl From<[f64; 3]> for AxisSample {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(Some(x), Some(y), Some(z))
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AxisSample {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "X={} Y={} Z={}", self.x, self.y, self.z)
    }
}

/// Ориентация датчика
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mounting {
    /// Плата лежит горизонтально, курс по осям X/Y
    Horizontal,
    /// Плата стоит на ребре, курс по осям X/Z
    Vertical,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_sample() {
        let sample = AxisSample::from((1.0, -2.0, 3.5));
        assert_eq!(sample.complete(), Some(Axes::new(1.0, -2.0, 3.5)));
        assert!(sample.is_complete());
    }

    #[test]
    fn test_missing_axis_is_incomplete() {
        let sample = AxisSample::new(Some(1.0), None, Some(3.0));
        assert_eq!(sample.complete(), None);
        assert!(!AxisSample::invalid().is_complete());
        assert!(!AxisSample::default().is_complete());
    }

    #[test]
    fn test_conversions_agree() {
        let from_axes = AxisSample::from(Axes::new(4.0, 5.0, 6.0));
        assert_eq!(from_axes, AxisSample::from([4.0, 5.0, 6.0]));
        assert_eq!(from_axes, AxisSample::from((4.0, 5.0, 6.0)));
    }
}
