pub mod hmc5883l;
pub mod qmc5883l;

#[cfg(test)]
pub(crate) mod mock;

pub use hmc5883l::{Hmc5883l, Hmc5883lError};
pub use qmc5883l::{Qmc5883l, Qmc5883lError};

use crate::data::AxisSample;

/// Трейт для всех магнитометров
pub trait Magnetometer {
    type Error;

    /// Чтение показания
    ///
    /// `Ok(None)`, если новое измерение еще не готово. Недействительные оси
    /// в показании равны `None`.
    fn sample(&mut self) -> Result<Option<AxisSample>, Self::Error>;
}

impl<M: Magnetometer + ?Sized> Magnetometer for &mut M {
    type Error = M::Error;

    fn sample(&mut self) -> Result<Option<AxisSample>, Self::Error> {
        (**self).sample()
    }
}
