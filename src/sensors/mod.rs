pub mod calibrator;

pub use calibrator::{CalibrationState, Calibrator, CompassError};
