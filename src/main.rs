#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, Config as I2cConfig};
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

mod tasks;

use compass_heading::config::hardware::{frequencies, pins};
use crate::tasks::compass_task::{self, HEADING};

/// Точка входа в программу
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // Инициализация HAL Raspberry Pi Pico
    let p = embassy_rp::init(Default::default());

    defmt::info!("=== Компас v0.1.0 ===");

    // Настройка светодиода для индикации состояния
    let mut led = Output::new(p.PIN_25, Level::Low);

    // Мигаем светодиодом при старте
    for _ in 0..3 {
        led.set_high();
        Timer::after(Duration::from_millis(100)).await;
        led.set_low();
        Timer::after(Duration::from_millis(100)).await;
    }

    // Инициализация I2C для магнитометра
    let i2c = {
        let sda = p.PIN_4; // GPIO4 - SDA
        let scl = p.PIN_5; // GPIO5 - SCL

        let mut config = I2cConfig::default();
        config.frequency = frequencies::I2C_FREQUENCY;

        i2c::I2c::new_blocking(p.I2C0, scl, sda, config)
    };
    defmt::info!(
        "I2C0: SDA=GPIO{}, SCL=GPIO{}, LED=GPIO{}",
        pins::i2c::SDA_PIN,
        pins::i2c::SCL_PIN,
        pins::LED_PIN
    );

    // Задача опроса магнитометра
    if spawner.spawn(compass_task::task(i2c)).is_err() {
        defmt::error!("Не удалось запустить задачу компаса");
        return;
    }

    // Основной цикл: вывод курса
    loop {
        let heading = HEADING.wait().await;
        led.toggle();
        defmt::info!("Курс: {}°", heading);
    }
}
