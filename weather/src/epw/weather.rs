/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/
use super::scanner::EPWScanner;
use super::weather_line::EPWWeatherLine;
use crate::error::DataFormatError;
use crate::location::Location;
use crate::try_file::REFERENCE_YEAR;
use crate::WeatherDataset;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A structure representing an EPW file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EPWWeather {
    /// The file this comes from
    #[serde(skip)]
    pub path: PathBuf,

    /// The [`Location`] of the EPW file
    pub location: Location,

    /// The weather data
    pub data: Vec<EPWWeatherLine>,
}

impl std::default::Default for EPWWeather {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            location: Location::default(),
            data: Vec::with_capacity(8760),
        }
    }
}

impl EPWWeather {
    /// Creates an `EPWWeather` from a file
    pub fn from_file<P: AsRef<Path>>(filename: P) -> Result<Self, DataFormatError> {
        let path = filename.as_ref();
        let src = fs::read(path).map_err(|source| DataFormatError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&src, path)
    }

    /// Parses the content of an EPW file. `path` is only used for reporting.
    pub fn from_bytes(src: &[u8], path: &Path) -> Result<Self, DataFormatError> {
        let mut epw = EPWScanner::build_weather_file(src, path)?;
        epw.path = path.to_path_buf();
        Ok(epw)
    }

    /// Transforms this into a [`WeatherDataset`]. The records are placed on the
    /// reference year, in the standard time of the file.
    pub fn into_dataset(self) -> Result<WeatherDataset, DataFormatError> {
        let path = self.path;
        let timestamps_error = |reason: String| DataFormatError::Timestamps {
            path: path.clone(),
            reason,
        };

        let offset = self.location.fixed_offset().ok_or_else(|| {
            timestamps_error(format!("invalid time zone {}", self.location.utc_offset))
        })?;

        let records = self
            .data
            .iter()
            .map(|line| {
                line.to_record(REFERENCE_YEAR, offset).ok_or_else(|| {
                    timestamps_error(format!(
                        "{}/{} does not exist in {}",
                        line.month, line.day, REFERENCE_YEAR
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(WeatherDataset::new(self.location, "epw", records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calendar::chrono::Duration;

    fn synthetic(days: usize) -> String {
        let mut s = "LOCATION,STUTTGART,BW,DEU,Synthetic,107380,48.83,9.20,1.0,315.0\nDATA PERIODS,1,1,Data,Thursday, 1/ 1,12/31\n".to_string();
        let mut n = 0;
        for (month, month_days) in [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31].iter().enumerate() {
            for day in 1..=*month_days {
                for hour in 1..=24 {
                    if n == days * 24 {
                        return s;
                    }
                    s.push_str(&format!("2001,{},{},{},60,?9?9?9?9E0?9?9?9?9?9?9?9?9?9?9?9?9?9?9*9*9?9?9?9,5.0,1.0,75,97000,0,1415,280,250,400,120,0,0,0,0,180,2.5,4,4,20.0,1200,9,999999999,12,0.1,0,88,0.2,0.0,0.0\n", month + 1, day, hour));
                    n += 1;
                }
            }
        }
        s
    }

    #[test]
    fn test_into_dataset() {
        let src = synthetic(365);
        let epw = EPWWeather::from_bytes(src.as_bytes(), Path::new("synthetic.epw")).unwrap();
        assert_eq!(epw.data.len(), 8760);

        let d = epw.into_dataset().unwrap();
        assert_eq!(d.kind, "epw");
        assert_eq!(d.location.latitude, 48.83);
        assert_eq!(d.location.altitude, 315.0);
        assert!(d.validate(Path::new("synthetic.epw")).is_ok());

        assert_eq!(
            d.records[0].timestamp.to_rfc3339(),
            "2015-01-01T00:00:00+01:00"
        );
        assert_eq!(
            d.records[8759].timestamp - d.records[0].timestamp,
            Duration::hours(8759)
        );

        let r = &d.records[100];
        assert_eq!(r.ghi, 250.);
        assert_eq!(r.dni, 400.);
        assert_eq!(r.dhi, 120.);
        assert_eq!(r.atmospheric_pressure, 97000.);
        assert_eq!(r.relative_humidity, 75.);
        assert_eq!(r.wind_direction, Some(180.));
        assert_eq!(r.sky_cover, Some(4.));
        assert_eq!(r.precipitable_water, Some(12.));
    }

    #[test]
    fn test_short_file() {
        let src = synthetic(20);
        let d = EPWWeather::from_bytes(src.as_bytes(), Path::new("short.epw"))
            .unwrap()
            .into_dataset()
            .unwrap();
        assert!(matches!(
            d.validate(Path::new("short.epw")),
            Err(DataFormatError::RowCount { found: 480, .. })
        ));
    }

    #[test]
    fn test_leap_day() {
        let src = synthetic(2).replace("2001,1,2,", "2001,2,29,");
        let epw = EPWWeather::from_bytes(src.as_bytes(), Path::new("leap.epw")).unwrap();
        assert!(matches!(
            epw.into_dataset(),
            Err(DataFormatError::Timestamps { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            EPWWeather::from_file("./this/does/not/exist.epw"),
            Err(DataFormatError::Io { .. })
        ));
    }
}
