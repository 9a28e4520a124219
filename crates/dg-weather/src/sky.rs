//! Climate-based sky derivation.
//!
//! The sky handed to the job service is the climate-based description for
//! one calendar hour: date and hour, site coordinates, and the measured
//! direct-normal / diffuse-horizontal irradiance at that hour.

use chrono::{Datelike, NaiveDate};

use crate::epw::EpwFile;
use crate::{WeatherError, WeatherResult};

#[derive(Debug, Clone, PartialEq)]
pub struct ClimateBasedSky {
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub time_zone: f64,
    pub direct_normal_irradiance: f64,
    pub diffuse_horizontal_irradiance: f64,
    pub north: i32,
}

impl ClimateBasedSky {
    /// Sky for a given hour of year. `north` is the counter-clockwise
    /// rotation of the model's north axis in degrees.
    pub fn from_epw(epw: &EpwFile, hoy: usize, north: i32) -> WeatherResult<Self> {
        let record = epw.record(hoy)?;
        let (month, day, hour) = calendar_hour(hoy)?;
        Ok(Self {
            month,
            day,
            hour,
            latitude: epw.location.latitude,
            longitude: epw.location.longitude,
            time_zone: epw.location.time_zone,
            direct_normal_irradiance: record.direct_normal_irradiance,
            diffuse_horizontal_irradiance: record.diffuse_horizontal_irradiance,
            north,
        })
    }

    /// Sky for the brightest hour of the year.
    pub fn at_brightest_hour(epw: &EpwFile, north: i32) -> WeatherResult<Self> {
        Self::from_epw(epw, epw.brightest_hour(), north)
    }

    /// The description string the job service consumes.
    pub fn to_sky_string(&self) -> String {
        format!(
            "climate-based {} {} {} -lat {} -lon {} -tz {} -dni {} -dhi {} -n {}",
            self.month,
            self.day,
            self.hour,
            self.latitude,
            self.longitude,
            self.time_zone,
            self.direct_normal_irradiance,
            self.diffuse_horizontal_irradiance,
            self.north
        )
    }
}

/// Convert an hour of year (0-based, non-leap year) to (month, day, hour).
fn calendar_hour(hoy: usize) -> WeatherResult<(u32, u32, u32)> {
    let day_of_year = (hoy / 24 + 1) as u32;
    let hour = (hoy % 24) as u32;
    let date = NaiveDate::from_yo_opt(2021, day_of_year).ok_or(WeatherError::HourOutOfRange {
        hoy,
        len: 8760,
    })?;
    Ok((date.month(), date.day(), hour))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epw::{HourlyRecord, Location};

    fn epw_with_peak_at(hoy: usize, len: usize) -> EpwFile {
        let mut records = vec![
            HourlyRecord {
                direct_normal_irradiance: 0.0,
                diffuse_horizontal_irradiance: 0.0,
                direct_normal_illuminance: 0.0,
            };
            len
        ];
        records[hoy] = HourlyRecord {
            direct_normal_irradiance: 715.0,
            diffuse_horizontal_irradiance: 115.0,
            direct_normal_illuminance: 88_000.0,
        };
        EpwFile {
            location: Location {
                city: "Test City".to_string(),
                latitude: 51.15,
                longitude: 0.18,
                time_zone: 0.0,
                elevation: 30.0,
            },
            records,
        }
    }

    #[test]
    fn calendar_hour_conversion() {
        assert_eq!(calendar_hour(0).unwrap(), (1, 1, 0));
        assert_eq!(calendar_hour(23).unwrap(), (1, 1, 23));
        assert_eq!(calendar_hour(24).unwrap(), (1, 2, 0));
        // Noon on June 21: doy 172 for a non-leap year.
        assert_eq!(calendar_hour(171 * 24 + 12).unwrap(), (6, 21, 12));
        assert_eq!(calendar_hour(8759).unwrap(), (12, 31, 23));
        assert!(calendar_hour(8760).is_err());
    }

    #[test]
    fn sky_string_carries_site_and_irradiance() {
        let epw = epw_with_peak_at(171 * 24 + 12, 8760);
        let sky = ClimateBasedSky::at_brightest_hour(&epw, 0).unwrap();
        assert_eq!(
            sky.to_sky_string(),
            "climate-based 6 21 12 -lat 51.15 -lon 0.18 -tz 0 -dni 715 -dhi 115 -n 0"
        );
    }

    #[test]
    fn out_of_range_hour_is_an_error() {
        let epw = epw_with_peak_at(0, 24);
        assert!(ClimateBasedSky::from_epw(&epw, 24, 0).is_err());
    }
}
