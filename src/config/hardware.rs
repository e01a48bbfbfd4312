//! Конфигурация аппаратного обеспечения компаса

use crate::drivers::mag::hmc5883l::GainRange;
use crate::drivers::mag::qmc5883l::{DataRate, FieldRange, Oversampling};

/// Модель магнитометра на шине
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagModel {
    Qmc5883l,
    Hmc5883l,
}

/// Установленный магнитометр
pub const MAG_MODEL: MagModel = MagModel::Qmc5883l;

/// Конфигурация пинов GPIO
pub mod pins {
    /// I2C для магнитометра
    pub mod i2c {
        /// Пин SDA для I2C0
        pub const SDA_PIN: u8 = 4;  // GPIO4
        /// Пин SCL для I2C0
        pub const SCL_PIN: u8 = 5;  // GPIO5
    }

    /// Встроенный светодиод на Pico
    pub const LED_PIN: u8 = 25;     // GPIO25
}

/// Конфигурация частот
pub mod frequencies {
    /// Частота I2C шины (Гц)
    pub const I2C_FREQUENCY: u32 = 400_000; // 400 kHz
}

/// Параметры QMC5883L
pub mod qmc5883l {
    use super::*;

    pub const OVERSAMPLING: Oversampling = Oversampling::Osr512;
    pub const RANGE: FieldRange = FieldRange::Gauss2;
    pub const DATA_RATE: DataRate = DataRate::Hz200;
}

/// Параметры HMC5883L
pub mod hmc5883l {
    use super::*;

    /// Диапазон измерений ±4.7 Га
    pub const GAIN: GainRange = GainRange::Ga4_7;
}
