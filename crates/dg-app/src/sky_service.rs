//! Sky derivation from a weather file.

use std::path::Path;

use dg_weather::{ClimateBasedSky, EpwFile};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct SkyResponse {
    pub sky: ClimateBasedSky,
    /// Hour of year the sky was derived for.
    pub hour_of_year: usize,
    pub sky_string: String,
}

/// Climate-based sky for the brightest hour of the weather file.
pub fn derive_sky(epw_path: &Path, north: i32) -> AppResult<SkyResponse> {
    if !epw_path.exists() {
        return Err(AppError::MissingWeatherFile);
    }

    let epw = EpwFile::load(epw_path)?;
    let hour_of_year = epw.brightest_hour();
    let sky = ClimateBasedSky::from_epw(&epw, hour_of_year, north)?;
    let sky_string = sky.to_sky_string();

    tracing::info!(hoy = hour_of_year, sky = %sky_string, "derived sky");
    Ok(SkyResponse {
        sky,
        hour_of_year,
        sky_string,
    })
}
