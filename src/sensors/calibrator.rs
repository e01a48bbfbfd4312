//! Калибровка магнитометра "на лету" и расчет курса
//!
//! Калибровка по огибающей min/max: смещение (hard iron) равно середине
//! диапазона по каждой оси, масштаб (упрощенный soft iron) приводит
//! полудиапазоны осей к их среднему значению. Огибающая только расширяется.

use num_traits::Float;

use crate::config::compass::Declination;
use crate::data::{Axes, AxisSample, Heading, Mounting};
use crate::utils::math::{heading_degrees, wrap_once_positive};

/// Ошибки расчета курса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompassError {
    /// Не получено ни одного действительного показания
    NotCalibrated,
    /// В показании пропущена ось
    IncompleteSample,
}

#[cfg(feature = "defmt")]
impl defmt::Format for CompassError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            CompassError::NotCalibrated => defmt::write!(fmt, "Compass: not calibrated"),
            CompassError::IncompleteSample => defmt::write!(fmt, "Compass: incomplete sample"),
        }
    }
}

/// Текущее состояние калибровки
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationState {
    /// Минимум по каждой оси
    pub min: Axes,
    /// Максимум по каждой оси
    pub max: Axes,
    /// Смещение: середина диапазона
    pub bias: Axes,
    /// Коэффициенты масштаба
    pub scale: Axes,
    /// Количество принятых показаний
    pub samples: u32,
}

impl CalibrationState {
    fn from_first(axes: Axes) -> Self {
        Self {
            min: axes,
            max: axes,
            bias: axes,
            scale: Axes::repeat(1.0),
            samples: 1,
        }
    }

    fn extend(&mut self, axes: &Axes) {
        self.min = self.min.inf(axes);
        self.max = self.max.sup(axes);
        self.samples = self.samples.saturating_add(1);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.bias = (self.min + self.max) / 2.0;

        let half_range = (self.max - self.min) / 2.0;
        // Защита от деления на ноль: пока хотя бы одна ось не повернута
        if half_range.iter().all(|&r| r != 0.0) {
            let avg = half_range.sum() / 3.0;
            self.scale = half_range.map(|r| avg / r);
        } else {
            self.scale = Axes::repeat(1.0);
        }
    }

    /// Полудиапазоны по осям
    pub fn half_range(&self) -> Axes {
        (self.max - self.min) / 2.0
    }
}

/// Калибратор магнитометра
pub struct Calibrator {
    state: Option<CalibrationState>,
    /// Магнитное склонение
    declination: Declination,
}

impl Calibrator {
    /// Создание калибратора с заданным склонением
    pub fn new(declination: impl Into<Declination>) -> Self {
        Self {
            state: None,
            declination: declination.into(),
        }
    }

    /// Учет нового показания
    ///
    /// Показание с пропущенной осью игнорируется.
    pub fn add_sample(&mut self, sample: &AxisSample) {
        let Some(axes) = sample.complete() else {
            log_trace!("Показание пропущено: недействительная ось");
            return;
        };

        match self.state.as_mut() {
            Some(state) => state.extend(&axes),
            None => {
                log_debug!("Первое показание: X={} Y={} Z={}", axes.x, axes.y, axes.z);
                self.state = Some(CalibrationState::from_first(axes));
            }
        }
    }

    /// Применение калибровки к показанию
    pub fn adjust(&self, axes: &Axes) -> Result<Axes, CompassError> {
        let state = self.state.as_ref().ok_or(CompassError::NotCalibrated)?;
        Ok((axes - state.bias).component_mul(&state.scale))
    }

    /// Курс для горизонтально установленного датчика
    pub fn heading_horizontal(&self, sample: &AxisSample) -> Result<Heading, CompassError> {
        let adjusted = self.adjust_sample(sample)?;
        Ok(self.to_heading(Float::atan2(adjusted.y, adjusted.x)))
    }

    /// Курс для датчика, установленного на ребро
    pub fn heading_vertical(&self, sample: &AxisSample) -> Result<Heading, CompassError> {
        let adjusted = self.adjust_sample(sample)?;
        Ok(self.to_heading(Float::atan2(adjusted.x, adjusted.z)))
    }

    /// Курс с учетом ориентации датчика
    pub fn heading(&self, sample: &AxisSample, mounting: Mounting) -> Result<Heading, CompassError> {
        match mounting {
            Mounting::Horizontal => self.heading_horizontal(sample),
            Mounting::Vertical => self.heading_vertical(sample),
        }
    }

    fn adjust_sample(&self, sample: &AxisSample) -> Result<Axes, CompassError> {
        let axes = sample.complete().ok_or(CompassError::IncompleteSample)?;
        self.adjust(&axes)
    }

    /// Поправка на склонение и перевод в градусы [0, 360)
    fn to_heading(&self, angle_rad: f64) -> Heading {
        heading_degrees(wrap_once_positive(angle_rad + self.declination.radians()))
    }

    /// Сброс калибровки
    pub fn reset(&mut self) {
        self.state = None;
    }

    pub fn is_calibrated(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&CalibrationState> {
        self.state.as_ref()
    }

    pub fn min(&self) -> Option<Axes> {
        self.state.map(|s| s.min)
    }

    pub fn max(&self) -> Option<Axes> {
        self.state.map(|s| s.max)
    }

    pub fn bias(&self) -> Option<Axes> {
        self.state.map(|s| s.bias)
    }

    pub fn scale_factors(&self) -> Option<Axes> {
        self.state.map(|s| s.scale)
    }

    pub fn sample_count(&self) -> u32 {
        self.state.map_or(0, |s| s.samples)
    }

    pub fn declination(&self) -> Declination {
        self.declination
    }
}
