//! Калибровка магнитометра "на лету" и расчет компасного курса
//!
//! Сырые показания датчика (QMC5883L, HMC5883L или любой другой
//! [`Magnetometer`]) подаются в [`Calibrator`], который отслеживает
//! огибающую min/max по осям, вычисляет смещение и масштаб и выдает курс
//! с поправкой на магнитное склонение.
#![cfg_attr(not(test), no_std)]

#[macro_use]
pub mod utils;

pub mod config;
pub mod data;
pub mod drivers;
pub mod sensors;

pub use config::compass::Declination;
pub use data::{AxisSample, Axes, Heading, Mounting};
pub use drivers::mag::Magnetometer;
pub use sensors::calibrator::{CalibrationState, Calibrator, CompassError};
pub use utils::math::twos_complement;
