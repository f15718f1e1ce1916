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
use crate::error::DataFormatError;
use crate::irradiance;
use crate::location::Location;
use crate::record::WeatherRecord;
use crate::Float;
use calendar::chrono::Duration;
use calendar::{Timestamp, HOURS_PER_YEAR};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default for [`WeatherDataset::timeshift_in_minutes`]
pub const DEFAULT_TIMESHIFT_IN_MINUTES: i64 = 30;

/// An hourly weather series, plus the information about where
/// it comes from and how it should be prepared before being used.
///
/// Records are in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WeatherDatasetDocument", into = "WeatherDatasetDocument")]
pub struct WeatherDataset {
    /// Where the data was measured (or synthesized)
    pub location: Location,

    /// The kind of reference year (e.g., "mittleres Jahr")
    pub kind: String,

    /// The span of years the data represents, if known
    pub years: Option<String>,

    /// Should [`WeatherDataset::adjust_timestamp`] be applied
    /// before simulating?
    pub adjust_timestamp: bool,

    /// Should [`WeatherDataset::recalculate_dni`] be applied
    /// before simulating?
    pub recalculate_dni: bool,

    /// How many minutes timestamps are moved by [`WeatherDataset::adjust_timestamp`]
    pub timeshift_in_minutes: i64,

    /// The data
    pub records: Vec<WeatherRecord>,
}

/// What [`WeatherDataset::prepare`] did to a dataset
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Preparation {
    /// The first timestamp after shifting, if the timestamps were shifted
    pub shifted_start: Option<Timestamp>,

    /// Was the DNI recalculated?
    pub dni_recalculated: bool,

    /// The DNI was recalculated on timestamps that were not adjusted,
    /// which may be physically inconsistent
    pub dni_on_unshifted_timestamps: bool,
}

impl WeatherDataset {
    /// Creates a dataset that asks for the default preparation
    /// (i.e., shift timestamps by 30 minutes and then recalculate the DNI)
    pub fn new(location: Location, kind: &str, records: Vec<WeatherRecord>) -> Self {
        Self {
            location,
            kind: kind.to_string(),
            years: None,
            adjust_timestamp: true,
            recalculate_dni: true,
            timeshift_in_minutes: DEFAULT_TIMESHIFT_IN_MINUTES,
            records,
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Is this dataset empty?
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Checks that this is a full year of hourly data with a
    /// constant UTC offset. `source` is only used for reporting errors.
    pub fn validate(&self, source: &Path) -> Result<(), DataFormatError> {
        if self.records.len() != HOURS_PER_YEAR {
            return Err(DataFormatError::RowCount {
                path: source.to_path_buf(),
                found: self.records.len(),
                expected: HOURS_PER_YEAR,
            });
        }

        for (i, pair) in self.records.windows(2).enumerate() {
            let (before, after) = (pair[0].timestamp, pair[1].timestamp);
            if before.offset() != after.offset() {
                return Err(DataFormatError::Timestamps {
                    path: source.to_path_buf(),
                    reason: format!("UTC offset changes after record {}", i),
                });
            }
            if after - before != Duration::hours(1) {
                return Err(DataFormatError::Timestamps {
                    path: source.to_path_buf(),
                    reason: format!(
                        "records {} and {} are not one hour apart ({} and {})",
                        i,
                        i + 1,
                        before.to_rfc3339(),
                        after.to_rfc3339()
                    ),
                });
            }
        }
        Ok(())
    }

    /// Moves every timestamp by [`WeatherDataset::timeshift_in_minutes`]. The spacing
    /// between records and their UTC offset do not change.
    ///
    /// Returns the new first timestamp.
    pub fn adjust_timestamp(&mut self) -> Option<Timestamp> {
        let shift = Duration::minutes(self.timeshift_in_minutes);
        for r in self.records.iter_mut() {
            r.timestamp += shift;
        }
        self.records.first().map(|r| r.timestamp)
    }

    /// Recalculates the direct normal irradiance from the global and diffuse
    /// horizontal irradiance and the position of the sun at each timestamp.
    ///
    /// Values that cannot be trusted (e.g., negative, or with the sun too low)
    /// become zero.
    pub fn recalculate_dni(&mut self) {
        for r in self.records.iter_mut() {
            let position = self.location.sun_position(&r.timestamp);
            r.dni = irradiance::clean(irradiance::dni(r.ghi, r.dhi, position.zenith));
        }
    }

    /// Applies the requested adjustments. Timestamps are always shifted
    /// before the DNI is recalculated, since the position of the
    /// sun depends on them.
    pub fn prepare(&mut self) -> Preparation {
        let mut ret = Preparation::default();
        if self.adjust_timestamp {
            ret.shifted_start = self.adjust_timestamp();
        }
        if self.recalculate_dni {
            self.recalculate_dni();
            ret.dni_recalculated = true;
            ret.dni_on_unshifted_timestamps = !self.adjust_timestamp;
        }
        ret
    }

    /// A column of the dataset
    pub fn column<F: Fn(&WeatherRecord) -> Float>(&self, f: F) -> Vec<Float> {
        self.records.iter().map(f).collect()
    }
}

/// The serialized shape of a [`WeatherDataset`]: metadata plus
/// one array per variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeatherDatasetDocument {
    altitude: Float,
    #[serde(default)]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    years: Option<String>,
    latitude: Float,
    longitude: Float,
    tz: Float,
    #[serde(default = "default_true")]
    adjust_timestamp: bool,
    #[serde(default = "default_true", rename = "recalculateDNI")]
    recalculate_dni: bool,
    #[serde(default = "default_timeshift")]
    timeshift_in_minutes: i64,
    weather_data: WeatherColumns,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WeatherColumns {
    #[serde(rename = "timeStamps")]
    timestamps: Vec<Timestamp>,
    temp_air: Vec<Float>,
    relative_humidity: Vec<Float>,
    wind_speed: Vec<Float>,
    atmospheric_pressure: Vec<Float>,
    ghi: Vec<Float>,
    dhi: Vec<Float>,
    dni: Vec<Float>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wind_direction: Option<Vec<Float>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sky_cover: Option<Vec<Float>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    precipitable_water: Option<Vec<Float>>,
}

fn default_true() -> bool {
    true
}

fn default_timeshift() -> i64 {
    DEFAULT_TIMESHIFT_IN_MINUTES
}

/// Collects an optional column, only if every record has it
fn optional_column<F: Fn(&WeatherRecord) -> Option<Float>>(
    records: &[WeatherRecord],
    f: F,
) -> Option<Vec<Float>> {
    records.iter().map(f).collect()
}

impl std::convert::From<WeatherDataset> for WeatherDatasetDocument {
    fn from(d: WeatherDataset) -> Self {
        let records = &d.records;
        let weather_data = WeatherColumns {
            timestamps: records.iter().map(|r| r.timestamp).collect(),
            temp_air: d.column(|r| r.temp_air),
            relative_humidity: d.column(|r| r.relative_humidity),
            wind_speed: d.column(|r| r.wind_speed),
            atmospheric_pressure: d.column(|r| r.atmospheric_pressure),
            ghi: d.column(|r| r.ghi),
            dhi: d.column(|r| r.dhi),
            dni: d.column(|r| r.dni),
            wind_direction: optional_column(records, |r| r.wind_direction),
            sky_cover: optional_column(records, |r| r.sky_cover),
            precipitable_water: optional_column(records, |r| r.precipitable_water),
        };

        Self {
            altitude: d.location.altitude,
            kind: d.kind,
            years: d.years,
            latitude: d.location.latitude,
            longitude: d.location.longitude,
            tz: d.location.utc_offset,
            adjust_timestamp: d.adjust_timestamp,
            recalculate_dni: d.recalculate_dni,
            timeshift_in_minutes: d.timeshift_in_minutes,
            weather_data,
        }
    }
}

impl std::convert::TryFrom<WeatherDatasetDocument> for WeatherDataset {
    type Error = DataFormatError;

    fn try_from(doc: WeatherDatasetDocument) -> Result<Self, Self::Error> {
        let cols = doc.weather_data;
        let n = cols.timestamps.len();

        let check = |name: &str, len: usize| -> Result<(), DataFormatError> {
            if len == n {
                Ok(())
            } else {
                Err(DataFormatError::Columns {
                    path: "<inline>".into(),
                    column: name.to_string(),
                    found: len,
                    expected: n,
                })
            }
        };
        check("temp_air", cols.temp_air.len())?;
        check("relative_humidity", cols.relative_humidity.len())?;
        check("wind_speed", cols.wind_speed.len())?;
        check("atmospheric_pressure", cols.atmospheric_pressure.len())?;
        check("ghi", cols.ghi.len())?;
        check("dhi", cols.dhi.len())?;
        check("dni", cols.dni.len())?;
        for (name, col) in [
            ("wind_direction", &cols.wind_direction),
            ("sky_cover", &cols.sky_cover),
            ("precipitable_water", &cols.precipitable_water),
        ] {
            if let Some(c) = col {
                check(name, c.len())?;
            }
        }

        let optional = |col: &Option<Vec<Float>>, i: usize| col.as_ref().map(|c| c[i]);
        let records = (0..n)
            .map(|i| WeatherRecord {
                timestamp: cols.timestamps[i],
                temp_air: cols.temp_air[i],
                relative_humidity: cols.relative_humidity[i],
                wind_speed: cols.wind_speed[i],
                atmospheric_pressure: cols.atmospheric_pressure[i],
                ghi: cols.ghi[i],
                dhi: cols.dhi[i],
                dni: cols.dni[i],
                wind_direction: optional(&cols.wind_direction, i),
                sky_cover: optional(&cols.sky_cover, i),
                precipitable_water: optional(&cols.precipitable_water, i),
            })
            .collect();

        Ok(Self {
            location: Location {
                latitude: doc.latitude,
                longitude: doc.longitude,
                utc_offset: doc.tz,
                altitude: doc.altitude,
                ..Location::default()
            },
            kind: doc.kind,
            years: doc.years,
            adjust_timestamp: doc.adjust_timestamp,
            recalculate_dni: doc.recalculate_dni,
            timeshift_in_minutes: doc.timeshift_in_minutes,
            records,
        })
    }
}
