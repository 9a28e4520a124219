//! dg-weather: EPW weather file parsing and climate-based sky derivation.

pub mod epw;
pub mod sky;

pub use epw::{EpwFile, HourlyRecord, Location};
pub use sky::ClimateBasedSky;

pub type WeatherResult<T> = Result<T, WeatherError>;

#[derive(thiserror::Error, Debug)]
pub enum WeatherError {
    #[error("Missing EPW header line: {what}")]
    MissingHeader { what: &'static str },

    #[error("Malformed EPW header: {what}")]
    MalformedHeader { what: String },

    #[error("Malformed EPW record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("EPW file has no hourly records")]
    NoRecords,

    #[error("Hour of year {hoy} out of range (have {len} records)")]
    HourOutOfRange { hoy: usize, len: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
