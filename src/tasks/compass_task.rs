// src/tasks/compass_task.rs
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};

use compass_heading::config::compass::{MOUNTING, SAMPLE_PERIOD_MS};
use compass_heading::config::hardware::{self, MagModel, MAG_MODEL};
use compass_heading::drivers::mag::qmc5883l::Qmc5883lConfig;
use compass_heading::drivers::mag::{Hmc5883l, Magnetometer, Qmc5883l};
use compass_heading::{Calibrator, Declination, Heading};

/// Последний рассчитанный курс (градусы)
pub static HEADING: Signal<CriticalSectionRawMutex, Heading> = Signal::new();

#[embassy_executor::task]
pub async fn task(i2c: I2c<'static, I2C0, Blocking>) {
    let calibrator = Calibrator::new(Declination::default());
    defmt::info!("Магнитное склонение: {}", calibrator.declination());

    match MAG_MODEL {
        MagModel::Qmc5883l => {
            let config = Qmc5883lConfig {
                oversampling: hardware::qmc5883l::OVERSAMPLING,
                range: hardware::qmc5883l::RANGE,
                data_rate: hardware::qmc5883l::DATA_RATE,
                ..Qmc5883lConfig::default()
            };
            match Qmc5883l::with_config(i2c, config) {
                Ok(mag) => run(mag, calibrator).await,
                Err(e) => defmt::error!("Ошибка инициализации QMC5883L: {}", e),
            }
        }
        MagModel::Hmc5883l => match Hmc5883l::new(i2c, hardware::hmc5883l::GAIN) {
            Ok(mag) => run(mag, calibrator).await,
            Err(e) => defmt::error!("Ошибка инициализации HMC5883L: {}", e),
        },
    }
}

/// Основной цикл опроса: показание -> калибровка -> курс
async fn run<M>(mut mag: M, mut calibrator: Calibrator)
where
    M: Magnetometer,
    M::Error: defmt::Format,
{
    defmt::info!("Вращайте датчик по всем осям для калибровки");

    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_PERIOD_MS));
    loop {
        ticker.next().await;

        let sample = match mag.sample() {
            Ok(Some(sample)) => sample,
            // Данные еще не готовы
            Ok(None) => continue,
            Err(e) => {
                defmt::error!("Ошибка чтения магнитометра: {}", e);
                continue;
            }
        };

        #[cfg(feature = "debug-sensors")]
        defmt::trace!("Магнитометр: {}", sample);

        calibrator.add_sample(&sample);

        match calibrator.heading(&sample, MOUNTING) {
            Ok(heading) => HEADING.signal(heading),
            Err(e) => defmt::warn!("Курс не рассчитан: {}", e),
        }
    }
}
