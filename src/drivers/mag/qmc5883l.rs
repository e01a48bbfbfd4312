//! Драйвер для магнитометра QMC5883L
//!
//! Несмотря на похожее название, регистры и порядок байт отличаются
//! от HMC5883L: данные идут в порядке X, Y, Z, младший байт первым.
use embedded_hal::i2c::I2c;

use super::Magnetometer;
use crate::data::AxisSample;
use crate::utils::math::twos_complement;

/// Адрес QMC5883L на шине I2C
pub const QMC5883L_ADDR: u8 = 0x0D;

/// Регистры QMC5883L
#[allow(dead_code)]
mod regs {
    pub const DATA_X_LSB: u8 = 0x00;    // Данные X (младший байт)
    pub const DATA_X_MSB: u8 = 0x01;    // Данные X (старший байт)
    pub const DATA_Y_LSB: u8 = 0x02;    // Данные Y (младший байт)
    pub const DATA_Y_MSB: u8 = 0x03;    // Данные Y (старший байт)
    pub const DATA_Z_LSB: u8 = 0x04;    // Данные Z (младший байт)
    pub const DATA_Z_MSB: u8 = 0x05;    // Данные Z (старший байт)
    pub const STATUS: u8 = 0x06;        // Регистр статуса
    pub const CONTROL_1: u8 = 0x09;     // OSR | RNG | ODR | MODE
    pub const CONTROL_2: u8 = 0x0A;     // Мягкий сброс, прерывания
    pub const SET_RESET: u8 = 0x0B;     // Период SET/RESET
    pub const CHIP_ID: u8 = 0x0D;       // Идентификатор (0xFF)
}

/// Биты регистра статуса
mod status {
    /// Данные готовы
    pub const DRDY: u8 = 0x01;
    /// Переполнение по одной из осей
    pub const OVL: u8 = 0x02;
}

/// Передискретизация
#[derive(Debug, Clone, Copy)]
pub enum Oversampling {
    Osr512 = 0x00,
    Osr256 = 0x40,
    Osr128 = 0x80,
    Osr64 = 0xC0,
}

/// Диапазон измерений
#[derive(Debug, Clone, Copy)]
pub enum FieldRange {
    /// ±2 Гс
    Gauss2 = 0x00,
    /// ±8 Гс
    Gauss8 = 0x10,
}

/// Частота измерений
#[derive(Debug, Clone, Copy)]
pub enum DataRate {
    Hz10 = 0x00,
    Hz50 = 0x04,
    Hz100 = 0x08,
    Hz200 = 0x0C,
}

/// Режим работы
#[derive(Debug, Clone, Copy)]
pub enum OperatingMode {
    /// Режим ожидания
    Standby = 0x00,
    /// Непрерывное измерение
    Continuous = 0x01,
}

/// Настройки регистра CONTROL_1
#[derive(Debug, Clone, Copy)]
pub struct Qmc5883lConfig {
    pub oversampling: Oversampling,
    pub range: FieldRange,
    pub data_rate: DataRate,
    pub mode: OperatingMode,
}

impl Default for Qmc5883lConfig {
    /// OSR=512, RNG=2G, ODR=200Hz, непрерывный режим
    fn default() -> Self {
        Self {
            oversampling: Oversampling::Osr512,
            range: FieldRange::Gauss2,
            data_rate: DataRate::Hz200,
            mode: OperatingMode::Continuous,
        }
    }
}

impl Qmc5883lConfig {
    /// Значение регистра CONTROL_1
    pub fn bits(&self) -> u8 {
        self.oversampling as u8 | self.range as u8 | self.data_rate as u8 | self.mode as u8
    }
}

/// Ошибки QMC5883L
#[derive(Debug, PartialEq)]
pub enum Qmc5883lError<E> {
    /// Ошибка I2C
    I2c(E),
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for Qmc5883lError<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Qmc5883lError::I2c(_) => defmt::write!(fmt, "QMC5883L: I2C error"),
        }
    }
}

impl<E> From<E> for Qmc5883lError<E> {
    fn from(error: E) -> Self {
        Qmc5883lError::I2c(error)
    }
}

/// Драйвер QMC5883L
pub struct Qmc5883l<I2C> {
    i2c: I2C,
    addr: u8,
    config: Qmc5883lConfig,
}

impl<I2C: I2c> Qmc5883l<I2C> {
    /// Создание драйвера с настройками по умолчанию
    pub fn new(i2c: I2C) -> Result<Self, Qmc5883lError<I2C::Error>> {
        Self::with_config(i2c, Qmc5883lConfig::default())
    }

    /// Создание драйвера с заданными настройками
    pub fn with_config(i2c: I2C, config: Qmc5883lConfig) -> Result<Self, Qmc5883lError<I2C::Error>> {
        let mut qmc = Self {
            i2c,
            addr: QMC5883L_ADDR,
            config,
        };
        qmc.init()?;
        Ok(qmc)
    }

    /// Инициализация QMC5883L
    fn init(&mut self) -> Result<(), Qmc5883lError<I2C::Error>> {
        // Рекомендованный период SET/RESET
        self.write_register(regs::SET_RESET, 0x01)?;
        self.write_register(regs::CONTROL_1, self.config.bits())?;

        log_info!("QMC5883L инициализирован, CONTROL_1={}", self.config.bits());
        Ok(())
    }

    /// Перевод в режим ожидания
    pub fn standby(&mut self) -> Result<(), Qmc5883lError<I2C::Error>> {
        self.config.mode = OperatingMode::Standby;
        self.write_register(regs::CONTROL_1, self.config.bits())?;
        Ok(())
    }

    /// Проверка готовности данных
    pub fn is_ready(&mut self) -> Result<bool, Qmc5883lError<I2C::Error>> {
        Ok((self.read_register(regs::STATUS)? & status::DRDY) != 0)
    }

    /// Чтение сырых значений по осям
    pub fn read_raw(&mut self) -> Result<[i32; 3], Qmc5883lError<I2C::Error>> {
        let mut buf = [0u8; 6];
        self.read_registers(regs::DATA_X_LSB, &mut buf)?;
        Ok([
            convert(buf[0], buf[1]),
            convert(buf[2], buf[3]),
            convert(buf[4], buf[5]),
        ])
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

/// Младший байт первым
fn convert(low: u8, high: u8) -> i32 {
    twos_complement(u16::from_le_bytes([low, high]) as u32, 16)
}

impl<I2C: I2c> Magnetometer for Qmc5883l<I2C> {
    type Error = Qmc5883lError<I2C::Error>;

    fn sample(&mut self) -> Result<Option<AxisSample>, Self::Error> {
        let flags = self.read_register(regs::STATUS)?;
        if (flags & status::DRDY) == 0 {
            return Ok(None);
        }

        // Чтение данных сбрасывает DRDY, поэтому читаем и при переполнении
        let [x, y, z] = self.read_raw()?;
        if (flags & status::OVL) != 0 {
            log_warn!("QMC5883L: переполнение данных");
            return Ok(Some(AxisSample::invalid()));
        }

        Ok(Some(AxisSample::from((x as f64, y as f64, z as f64))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::mag::mock::MockI2c;
    use embedded_hal::i2c::ErrorKind;

    fn driver() -> Qmc5883l<MockI2c> {
        Qmc5883l::new(MockI2c::new(QMC5883L_ADDR)).unwrap()
    }

    #[test]
    fn test_init_writes_set_reset_and_control() {
        let qmc = driver();
        let i2c = qmc.release();
        assert_eq!(
            i2c.writes,
            vec![
                (QMC5883L_ADDR, vec![regs::SET_RESET, 0x01]),
                (QMC5883L_ADDR, vec![regs::CONTROL_1, 0b0000_1101]),
            ]
        );
    }

    #[test]
    fn test_config_bits() {
        let config = Qmc5883lConfig {
            oversampling: Oversampling::Osr64,
            range: FieldRange::Gauss8,
            data_rate: DataRate::Hz50,
            mode: OperatingMode::Continuous,
        };
        assert_eq!(config.bits(), 0xC0 | 0x10 | 0x04 | 0x01);
        assert_eq!(Qmc5883lConfig::default().bits(), 0x0D);
    }

    #[test]
    fn test_not_ready_returns_none() {
        let mut qmc = driver();
        assert!(!qmc.is_ready().unwrap());
        assert_eq!(qmc.sample(), Ok(None));
    }

    #[test]
    fn test_sample_decodes_little_endian() {
        let mut qmc = driver();
        qmc.i2c.set_registers(regs::DATA_X_LSB, &[0x34, 0x12, 0xFE, 0xFF, 0x00, 0x80]);
        qmc.i2c.set_registers(regs::STATUS, &[status::DRDY]);

        assert!(qmc.is_ready().unwrap());
        assert_eq!(
            qmc.sample(),
            Ok(Some(AxisSample::from((4660.0, -2.0, -32768.0))))
        );
    }

    #[test]
    fn test_overflow_invalidates_sample() {
        let mut qmc = driver();
        qmc.i2c.set_registers(regs::DATA_X_LSB, &[0xFF, 0x7F, 0x00, 0x00, 0x01, 0x00]);
        qmc.i2c.set_registers(regs::STATUS, &[status::DRDY | status::OVL]);

        let sample = qmc.sample().unwrap().unwrap();
        assert!(!sample.is_complete());
    }

    #[test]
    fn test_standby_writes_mode() {
        let mut qmc = driver();
        qmc.standby().unwrap();
        assert_eq!(qmc.i2c.registers[regs::CONTROL_1 as usize], 0x0C);
    }

    #[test]
    fn test_bus_error_propagates() {
        let mut qmc = driver();
        qmc.i2c.fail_next = true;
        assert_eq!(qmc.sample(), Err(Qmc5883lError::I2c(ErrorKind::Bus)));
    }
}
