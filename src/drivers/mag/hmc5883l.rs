//! Драйвер для магнитометра HMC5883L
use embedded_hal::i2c::I2c;

use super::Magnetometer;
use crate::data::AxisSample;
use crate::utils::math::{round_to, word_to_i16};

/// Адрес HMC5883L на шине I2C
pub const HMC5883L_ADDR: u8 = 0x1E;

/// Значение, которое АЦП выдает при переполнении
const OVERFLOW: i32 = -4096;

/// Регистры HMC5883L
#[allow(dead_code)]
mod regs {
    pub const CONFIG_A: u8 = 0x00;      // Конфигурация A
    pub const CONFIG_B: u8 = 0x01;      // Конфигурация B (усиление)
    pub const MODE: u8 = 0x02;          // Режим работы
    pub const DATA_X_MSB: u8 = 0x03;    // Данные X (старший байт)
    pub const DATA_X_LSB: u8 = 0x04;    // Данные X (младший байт)
    pub const DATA_Z_MSB: u8 = 0x05;    // Данные Z (старший байт)
    pub const DATA_Z_LSB: u8 = 0x06;    // Данные Z (младший байт)
    pub const DATA_Y_MSB: u8 = 0x07;    // Данные Y (старший байт)
    pub const DATA_Y_LSB: u8 = 0x08;    // Данные Y (младший байт)
    pub const STATUS: u8 = 0x09;        // Регистр статуса
    pub const ID_A: u8 = 0x0A;          // Идентификация A (должен быть 'H')
    pub const ID_B: u8 = 0x0B;          // Идентификация B (должен быть '4')
    pub const ID_C: u8 = 0x0C;          // Идентификация C (должен быть '3')
}

/// 8 усреднений, 15 Hz, нормальный режим измерения
const CONFIG_A_DEFAULT: u8 = 0x70;

/// Диапазон измерений (усиление)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GainRange {
    /// ±0.88 Га
    Ga0_88 = 0x00,
    /// ±1.3 Га (по умолчанию)
    Ga1_3 = 0x20,
    /// ±1.9 Га
    Ga1_9 = 0x40,
    /// ±2.5 Га
    Ga2_5 = 0x60,
    /// ±4.0 Га
    Ga4_0 = 0x80,
    /// ±4.7 Га
    Ga4_7 = 0xA0,
    /// ±5.6 Га
    Ga5_6 = 0xC0,
    /// ±8.1 Га
    Ga8_1 = 0xE0,
}

impl GainRange {
    /// Диапазон по значению в гауссах
    pub fn from_gauss(gauss: f32) -> Option<Self> {
        const TABLE: [(f32, GainRange); 8] = [
            (0.88, GainRange::Ga0_88),
            (1.3, GainRange::Ga1_3),
            (1.9, GainRange::Ga1_9),
            (2.5, GainRange::Ga2_5),
            (4.0, GainRange::Ga4_0),
            (4.7, GainRange::Ga4_7),
            (5.6, GainRange::Ga5_6),
            (8.1, GainRange::Ga8_1),
        ];
        TABLE
            .iter()
            .find(|(g, _)| libm::fabsf(*g - gauss) < 1e-3)
            .map(|&(_, range)| range)
    }

    /// Цифровое разрешение (мГс/LSB)
    pub fn resolution(&self) -> f64 {
        match self {
            GainRange::Ga0_88 => 0.73,
            GainRange::Ga1_3 => 0.92,
            GainRange::Ga1_9 => 1.22,
            GainRange::Ga2_5 => 1.52,
            GainRange::Ga4_0 => 2.27,
            GainRange::Ga4_7 => 2.56,
            GainRange::Ga5_6 => 3.03,
            GainRange::Ga8_1 => 4.35,
        }
    }
}

/// Режим работы
#[derive(Debug, Clone, Copy)]
pub enum OperatingMode {
    /// Непрерывное измерение
    Continuous = 0x00,
    /// Одиночное измерение
    Single = 0x01,
    /// Режим ожидания
    Idle = 0x02,
}

/// Ошибки HMC5883L
#[derive(Debug, PartialEq)]
pub enum Hmc5883lError<E> {
    /// Ошибка I2C
    I2c(E),
    /// Неверный идентификатор устройства
    InvalidDevice,
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for Hmc5883lError<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Hmc5883lError::I2c(_) => defmt::write!(fmt, "HMC5883L: I2C error"),
            Hmc5883lError::InvalidDevice => defmt::write!(fmt, "HMC5883L: Invalid device ID"),
        }
    }
}

impl<E> From<E> for Hmc5883lError<E> {
    fn from(error: E) -> Self {
        Hmc5883lError::I2c(error)
    }
}

/// Драйвер HMC5883L
pub struct Hmc5883l<I2C> {
    i2c: I2C,
    addr: u8,
    gain: GainRange,
}

impl<I2C: I2c> Hmc5883l<I2C> {
    /// Создание нового экземпляра драйвера
    pub fn new(i2c: I2C, gain: GainRange) -> Result<Self, Hmc5883lError<I2C::Error>> {
        let mut hmc = Self {
            i2c,
            addr: HMC5883L_ADDR,
            gain,
        };
        hmc.init()?;
        Ok(hmc)
    }

    /// Инициализация HMC5883L
    fn init(&mut self) -> Result<(), Hmc5883lError<I2C::Error>> {
        // Проверка идентификатора
        let mut id = [0u8; 3];
        self.read_registers(regs::ID_A, &mut id)?;
        if id != *b"H43" {
            log_warn!("Неверный ID HMC5883L: {} {} {}", id[0], id[1], id[2]);
            return Err(Hmc5883lError::InvalidDevice);
        }

        // Конфигурация A, усиление и непрерывный режим одной записью
        self.i2c.write(
            self.addr,
            &[regs::CONFIG_A, CONFIG_A_DEFAULT, self.gain as u8, OperatingMode::Continuous as u8],
        )?;

        log_info!("HMC5883L инициализирован, разрешение {} мГс/LSB", self.gain.resolution());
        Ok(())
    }

    /// Установка усиления
    pub fn set_gain(&mut self, gain: GainRange) -> Result<(), Hmc5883lError<I2C::Error>> {
        self.write_register(regs::CONFIG_B, gain as u8)?;
        self.gain = gain;
        Ok(())
    }

    pub fn gain(&self) -> GainRange {
        self.gain
    }

    /// Установка режима работы
    pub fn set_mode(&mut self, mode: OperatingMode) -> Result<(), Hmc5883lError<I2C::Error>> {
        self.write_register(regs::MODE, mode as u8)?;
        Ok(())
    }

    /// Проверка готовности данных
    pub fn is_ready(&mut self) -> Result<bool, Hmc5883lError<I2C::Error>> {
        Ok((self.read_register(regs::STATUS)? & 0x01) != 0)
    }

    /// Чтение показания в мГс
    ///
    /// Ось, по которой АЦП переполнен, возвращается как `None`.
    pub fn read_axes(&mut self) -> Result<AxisSample, Hmc5883lError<I2C::Error>> {
        let mut buf = [0u8; 6];
        self.read_registers(regs::DATA_X_MSB, &mut buf)?;

        // Порядок: X, Z, Y в регистрах!
        Ok(AxisSample::new(
            self.convert(buf[0], buf[1]),
            self.convert(buf[4], buf[5]),
            self.convert(buf[2], buf[3]),
        ))
    }

    fn convert(&self, high: u8, low: u8) -> Option<f64> {
        let raw = word_to_i16(high, low);
        if raw == OVERFLOW {
            return None;
        }
        Some(round_to(raw as f64 * self.gain.resolution(), 4))
    }

    /// Возврат шины I2C
    pub fn release(self) -> I2C {
        self.i2c
    }

    // Вспомогательные методы I2C
    fn read_register(&mut self, reg: u8) -> Result<u8, I2C::Error> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(self.addr, &[reg], &mut buf)?;
        Ok(buf[0])
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.addr, &[reg, value])
    }

    fn read_registers(&mut self, start_reg: u8, buf: &mut [u8]) -> Result<(), I2C::Error> {
        self.i2c.write_read(self.addr, &[start_reg], buf)
    }
}

impl<I2C: I2c> Magnetometer for Hmc5883l<I2C> {
    type Error = Hmc5883lError<I2C::Error>;

    fn sample(&mut self) -> Result<Option<AxisSample>, Self::Error> {
        if !self.is_ready()? {
            return Ok(None);
        }

        let sample = self.read_axes()?;
        if !sample.is_complete() {
            log_warn!("HMC5883L: переполнение данных");
        }
        Ok(Some(sample))
    }
}
