//! EPW hourly weather file parsing.
//!
//! Only the fields this workflow consumes are kept per record: the direct
//! normal illuminance series (peak-hour lookup) and the two irradiance
//! series feeding the climate-based sky.

use std::path::Path;

use crate::{WeatherError, WeatherResult};

// Column indices within an EPW data row.
const FIELD_DIRECT_NORMAL_IRRADIANCE: usize = 14;
const FIELD_DIFFUSE_HORIZONTAL_IRRADIANCE: usize = 15;
const FIELD_DIRECT_NORMAL_ILLUMINANCE: usize = 17;
const MIN_RECORD_FIELDS: usize = 18;

// A full EPW carries eight header lines before the hourly data.
const HEADER_LINES: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub time_zone: f64,
    pub elevation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyRecord {
    /// W/m2
    pub direct_normal_irradiance: f64,
    /// W/m2
    pub diffuse_horizontal_irradiance: f64,
    /// lux
    pub direct_normal_illuminance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EpwFile {
    pub location: Location,
    pub records: Vec<HourlyRecord>,
}

impl EpwFile {
    pub fn load(path: &Path) -> WeatherResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> WeatherResult<Self> {
        let mut lines = content.lines();

        let location_line = lines.next().ok_or(WeatherError::MissingHeader {
            what: "LOCATION",
        })?;
        let location = parse_location(location_line)?;

        // Skip the remaining header lines (design conditions through data
        // periods); their content is not consumed by this workflow.
        for what in [
            "DESIGN CONDITIONS",
            "TYPICAL/EXTREME PERIODS",
            "GROUND TEMPERATURES",
            "HOLIDAYS/DAYLIGHT SAVINGS",
            "COMMENTS 1",
            "COMMENTS 2",
            "DATA PERIODS",
        ] {
            lines.next().ok_or(WeatherError::MissingHeader { what })?;
        }

        let mut records = Vec::new();
        for (offset, line) in lines.enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let line_no = HEADER_LINES + offset + 1;
            records.push(parse_record(line, line_no)?);
        }

        if records.is_empty() {
            return Err(WeatherError::NoRecords);
        }

        Ok(Self { location, records })
    }

    /// Hour of year with the peak direct normal illuminance, first
    /// occurrence on ties.
    pub fn brightest_hour(&self) -> usize {
        let mut best = 0usize;
        let mut best_value = f64::NEG_INFINITY;
        for (hoy, record) in self.records.iter().enumerate() {
            if record.direct_normal_illuminance > best_value {
                best = hoy;
                best_value = record.direct_normal_illuminance;
            }
        }
        best
    }

    pub fn record(&self, hoy: usize) -> WeatherResult<&HourlyRecord> {
        self.records.get(hoy).ok_or(WeatherError::HourOutOfRange {
            hoy,
            len: self.records.len(),
        })
    }
}

fn parse_location(line: &str) -> WeatherResult<Location> {
    let fields: Vec<&str> = line.split(',').collect();
    if !fields[0].eq_ignore_ascii_case("LOCATION") || fields.len() < 10 {
        return Err(WeatherError::MalformedHeader {
            what: format!("expected LOCATION line with 10 fields, got '{line}'"),
        });
    }

    let number = |index: usize, what: &str| -> WeatherResult<f64> {
        fields[index]
            .trim()
            .parse::<f64>()
            .map_err(|_| WeatherError::MalformedHeader {
                what: format!("{what} '{}' is not a number", fields[index]),
            })
    };

    Ok(Location {
        city: fields[1].trim().to_string(),
        latitude: number(6, "latitude")?,
        longitude: number(7, "longitude")?,
        time_zone: number(8, "time zone")?,
        elevation: number(9, "elevation")?,
    })
}

fn parse_record(line: &str, line_no: usize) -> WeatherResult<HourlyRecord> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < MIN_RECORD_FIELDS {
        return Err(WeatherError::MalformedRecord {
            line: line_no,
            reason: format!(
                "expected at least {MIN_RECORD_FIELDS} fields, got {}",
                fields.len()
            ),
        });
    }

    let number = |index: usize| -> WeatherResult<f64> {
        fields[index]
            .trim()
            .parse::<f64>()
            .map_err(|_| WeatherError::MalformedRecord {
                line: line_no,
                reason: format!("field {index} '{}' is not a number", fields[index]),
            })
    };

    Ok(HourlyRecord {
        direct_normal_irradiance: number(FIELD_DIRECT_NORMAL_IRRADIANCE)?,
        diffuse_horizontal_irradiance: number(FIELD_DIFFUSE_HORIZONTAL_IRRADIANCE)?,
        direct_normal_illuminance: number(FIELD_DIRECT_NORMAL_ILLUMINANCE)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_line(dni_rad: f64, dhi_rad: f64, dni_lux: f64) -> String {
        let mut fields = vec!["2021".to_string(), "6".to_string(), "21".to_string()];
        fields.extend(std::iter::repeat_n("0".to_string(), 11));
        // fields 14..18: dni W/m2, dhi W/m2, global lux, dni lux
        fields.push(dni_rad.to_string());
        fields.push(dhi_rad.to_string());
        fields.push("0".to_string());
        fields.push(dni_lux.to_string());
        fields.join(",")
    }

    fn sample_epw(rows: &[String]) -> String {
        let mut content = String::from(
            "LOCATION,Test City,ST,USA,TMY3,725300,41.98,-87.92,-6.0,201.0\n",
        );
        for header in [
            "DESIGN CONDITIONS,0",
            "TYPICAL/EXTREME PERIODS,0",
            "GROUND TEMPERATURES,0",
            "HOLIDAYS/DAYLIGHT SAVINGS,No,0,0,0",
            "COMMENTS 1,",
            "COMMENTS 2,",
            "DATA PERIODS,1,1,Data,Sunday, 1/ 1,12/31",
        ] {
            content.push_str(header);
            content.push('\n');
        }
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        content
    }

    #[test]
    fn parses_location_and_records() {
        let content = sample_epw(&[
            record_line(100.0, 40.0, 11_000.0),
            record_line(800.0, 120.0, 88_000.0),
            record_line(500.0, 90.0, 55_000.0),
        ]);
        let epw = EpwFile::parse(&content).unwrap();

        assert_eq!(epw.location.city, "Test City");
        assert_eq!(epw.location.latitude, 41.98);
        assert_eq!(epw.location.time_zone, -6.0);
        assert_eq!(epw.records.len(), 3);
        assert_eq!(epw.records[1].direct_normal_irradiance, 800.0);
    }

    #[test]
    fn brightest_hour_takes_first_peak() {
        let content = sample_epw(&[
            record_line(0.0, 0.0, 10.0),
            record_line(0.0, 0.0, 90.0),
            record_line(0.0, 0.0, 90.0),
        ]);
        let epw = EpwFile::parse(&content).unwrap();
        assert_eq!(epw.brightest_hour(), 1);
    }

    #[test]
    fn short_record_is_an_error() {
        let content = sample_epw(&["2021,6,21,12".to_string()]);
        let err = EpwFile::parse(&content).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedRecord { line: 9, .. }));
    }

    #[test]
    fn missing_headers_are_an_error() {
        let err = EpwFile::parse("LOCATION,City,ST,USA,x,0,1.0,2.0,0.0,10.0\n").unwrap_err();
        assert!(matches!(err, WeatherError::MissingHeader { .. }));
    }
}
