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
use crate::geodesy::CoordinateTransform;
use crate::location::Location;
use crate::record::WeatherRecord;
use crate::{Float, WeatherDataset};
use calendar::chrono::FixedOffset;
use calendar::{Period, HOURS_PER_YEAR};
use std::fs;
use std::path::{Path, PathBuf};

/// Year assigned to the (year-less) records of a test reference year
pub const REFERENCE_YEAR: i32 = 2015;

/// Test reference years are given in Central European (standard) Time
pub const UTC_OFFSET_HOURS: i32 = 1;

/// Lines starting with this separate the header from the data
const SENTINEL: &str = "***";

/// A fixed-format Test Reference Year (TRY) file, as distributed by the
/// German Weather Service (DWD).
///
/// The header contains free text plus some `Label : value` lines. It ends with a
/// line starting with `***`; the line right before it has the names of the
/// columns of the whitespace-separated table that follows.
#[derive(Debug, Clone, Default)]
pub struct TestReferenceYear {
    /// The file this comes from
    pub path: PathBuf,

    /// Projected easting (m)
    pub easting: Float,

    /// Projected northing (m)
    pub northing: Float,

    /// Altitude above sea level (m)
    pub altitude: Float,

    /// Kind of reference year (e.g., "mittleres Jahr")
    pub kind: String,

    /// The years the data represents (e.g., "1995-2012")
    pub years: Option<String>,

    /// The names of the columns
    pub columns: Vec<String>,

    /// The data, row by row
    pub rows: Vec<Vec<Float>>,
}

/// Header values, as they are found
#[derive(Debug, Default)]
struct Header {
    easting: Option<Float>,
    northing: Option<Float>,
    altitude: Option<Float>,
    kind: Option<String>,
    years: Option<String>,
}

/// Stores the value of a header field
type Converter = fn(&mut Header, &str) -> Result<(), String>;

/// Label prefixes and what to do with their values. Header lines are matched
/// against these, so their order and position do not matter.
const HEADER_FIELDS: [(&str, Converter); 5] = [
    ("Rechtswert", set_easting),
    ("Hochwert", set_northing),
    ("Hoehenlage", set_altitude),
    ("Art des TRY", set_kind),
    ("Bezugszeitraum", set_years),
];

/// Finds the first integer in a piece of text (e.g., `3936500` in `3936500 Meter`)
fn first_integer(value: &str) -> Result<Float, String> {
    let bytes = value.as_bytes();
    let start = bytes
        .iter()
        .position(|b| b.is_ascii_digit())
        .ok_or_else(|| format!("no number found in '{}'", value.trim()))?;
    let end = bytes[start..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map_or(bytes.len(), |p| start + p);
    let negative = start > 0 && bytes[start - 1] == b'-';

    let v = value[start..end]
        .parse::<i64>()
        .map_err(|e| e.to_string())? as Float;
    Ok(if negative { -v } else { v })
}

fn set_easting(h: &mut Header, value: &str) -> Result<(), String> {
    h.easting = Some(first_integer(value)?);
    Ok(())
}

fn set_northing(h: &mut Header, value: &str) -> Result<(), String> {
    h.northing = Some(first_integer(value)?);
    Ok(())
}

fn set_altitude(h: &mut Header, value: &str) -> Result<(), String> {
    h.altitude = Some(first_integer(value)?);
    Ok(())
}

fn set_kind(h: &mut Header, value: &str) -> Result<(), String> {
    h.kind = Some(value.trim().to_string());
    Ok(())
}

fn set_years(h: &mut Header, value: &str) -> Result<(), String> {
    h.years = Some(value.trim().to_string());
    Ok(())
}

impl TestReferenceYear {
    /// Reads a TRY file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DataFormatError> {
        let path = path.as_ref();
        let src = fs::read(path).map_err(|source| DataFormatError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        // These files are usually Latin-1 encoded; the parts we need are ASCII.
        let src = String::from_utf8_lossy(&src);
        Self::parse(&src, path)
    }

    /// Parses the content of a TRY file. `path` is only used for reporting.
    pub fn parse(src: &str, path: &Path) -> Result<Self, DataFormatError> {
        let mut header = Header::default();
        let mut columns: Option<Vec<String>> = None;
        let mut previous_line = "";
        let mut rows = Vec::with_capacity(HOURS_PER_YEAR);

        for (i, line) in src.lines().enumerate() {
            let line_number = i + 1;

            if columns.is_none() {
                // Still in the header
                let trimmed = line.trim_start();
                if trimmed.starts_with(SENTINEL) {
                    columns = Some(
                        previous_line
                            .split_whitespace()
                            .filter(|t| t.chars().all(|c| c.is_alphabetic()))
                            .map(|t| t.to_string())
                            .collect(),
                    );
                } else {
                    Self::scan_header_line(&mut header, trimmed, path)?;
                    previous_line = line;
                }
                continue;
            }
            let n_columns = columns.as_ref().map_or(0, |c| c.len());

            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .map(|v| {
                    v.parse::<Float>().map_err(|_| DataFormatError::Value {
                        path: path.to_path_buf(),
                        line: line_number,
                        value: v.to_string(),
                    })
                })
                .collect::<Result<Vec<Float>, DataFormatError>>()?;
            if row.len() != n_columns {
                return Err(DataFormatError::Value {
                    path: path.to_path_buf(),
                    line: line_number,
                    value: format!(
                        "{} (expected {} values, found {})",
                        line.trim(),
                        n_columns,
                        row.len()
                    ),
                });
            }
            rows.push(row);
        }

        let required = |v: Option<Float>, field: &str| {
            v.ok_or_else(|| DataFormatError::MissingHeader {
                path: path.to_path_buf(),
                field: field.to_string(),
            })
        };
        let easting = required(header.easting, "Rechtswert")?;
        let northing = required(header.northing, "Hochwert")?;
        let altitude = required(header.altitude, "Hoehenlage")?;

        let columns = columns.ok_or_else(|| DataFormatError::MissingSentinel {
            path: path.to_path_buf(),
        })?;

        if rows.len() != HOURS_PER_YEAR {
            return Err(DataFormatError::RowCount {
                path: path.to_path_buf(),
                found: rows.len(),
                expected: HOURS_PER_YEAR,
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            easting,
            northing,
            altitude,
            kind: header.kind.unwrap_or_else(|| "unknown".to_string()),
            years: header.years,
            columns,
            rows,
        })
    }

    /// Stores the value of a header line, if it is one we know.
    fn scan_header_line(
        header: &mut Header,
        line: &str,
        path: &Path,
    ) -> Result<(), DataFormatError> {
        for (label, converter) in HEADER_FIELDS.iter() {
            if !line.starts_with(label) {
                continue;
            }
            let value = match line.split_once(':') {
                Some((_, v)) => v,
                None => {
                    return Err(DataFormatError::Header {
                        path: path.to_path_buf(),
                        field: label.to_string(),
                        reason: "no ':' separating the label from the value".to_string(),
                    })
                }
            };

            return converter(header, value).map_err(|reason| DataFormatError::Header {
                path: path.to_path_buf(),
                field: label.to_string(),
                reason,
            });
        }
        Ok(())
    }

    /// Gets a whole column by name
    pub fn column(&self, name: &str) -> Option<Vec<Float>> {
        let i = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| row[i]).collect())
    }

    /// Transforms this into a [`WeatherDataset`]. `transform` converts the
    /// projected coordinates in the header into latitude and longitude.
    pub fn into_dataset<T: CoordinateTransform>(
        self,
        transform: &T,
    ) -> Result<WeatherDataset, DataFormatError> {
        let path = &self.path;
        let get = |name: &str| {
            self.column(name).ok_or_else(|| DataFormatError::MissingColumn {
                path: path.clone(),
                column: name.to_string(),
            })
        };
        let temp_air = get("t")?;
        let pressure = get("p")?;
        let wind_direction = get("WR")?;
        let wind_speed = get("WG")?;
        let sky_cover = get("N")?;
        let humidity_ratio = get("x")?;
        let relative_humidity = get("RF")?;
        let direct_horizontal = get("B")?;
        let diffuse = get("D")?;

        let offset = FixedOffset::east_opt(UTC_OFFSET_HOURS * 3600);
        let period = offset
            .and_then(|o| Period::reference_year(REFERENCE_YEAR, o))
            .ok_or_else(|| DataFormatError::Timestamps {
                path: path.clone(),
                reason: "could not build the reference year".to_string(),
            })?;

        let records = period
            .enumerate()
            .map(|(i, timestamp)| WeatherRecord {
                timestamp,
                temp_air: temp_air[i],
                relative_humidity: relative_humidity[i],
                wind_speed: wind_speed[i],
                atmospheric_pressure: pressure[i] * 100.,
                ghi: diffuse[i] + direct_horizontal[i],
                dhi: diffuse[i],
                // Replaced when the DNI is recalculated
                dni: direct_horizontal[i],
                wind_direction: Some(wind_direction[i]),
                sky_cover: Some(sky_cover[i]),
                precipitable_water: Some(humidity_ratio[i]),
            })
            .collect();

        let (latitude, longitude) = transform.to_geographic(self.easting, self.northing);
        let location = Location {
            latitude,
            longitude,
            utc_offset: UTC_OFFSET_HOURS as Float,
            altitude: self.altitude,
            ..Location::default()
        };

        let mut dataset = WeatherDataset::new(location, &self.kind, records);
        dataset.years = self.years.clone();
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesy::EPSG_3034;
    use approx::assert_abs_diff_eq;
    use calendar::chrono::Duration;

    const HEADER: &str = "Koordinatensystem : Lambert konform konisch
Rechtswert        : 3936500 Meter
Hochwert          : 2449500 Meter
Hoehenlage        : 247 Meter ueber NN
Erstellung des Datensatzes im Mai 2016

Art des TRY       : mittleres Jahr
Bezugszeitraum    : 1995-2012
Datenbasis 1      : Beobachtungsdaten Zeitraum 1995-2012

Format: (i7,1x,i7,1x,i2,1x,i2,1x,i2,1x,f5.1,1x,i4,1x,i3,1x,f4.1,1x,i1,1x,f4.1,1x,i3,1x,i4,1x,i4,1x,i3,1x,i4,1x,i2)

RW Rechtswert                                                    [m]       {3670500;3671500..4389500}
t  Lufttemperatur in 2m Hoehe ueber Grund                        [GradC]
    RW      HW MM DD HH     t    p  WR   WG N    x  RF    B    D   A    E IL
***
";

    fn synthetic(rows: usize) -> String {
        let mut s = HEADER.to_string();
        for i in 0..rows {
            let hour = i % 24 + 1;
            let (b, d) = if (9..=15).contains(&hour) { (300, 100) } else { (0, 0) };
            s.push_str(&format!(
                "3936500 2449500  1  1 {:2}   5.0  985 220  3.1 5  4.8  80 {:4} {:4} 300  350  0\n",
                hour, b, d
            ));
        }
        s
    }

    #[test]
    fn test_first_integer() {
        assert_eq!(first_integer(" 3936500 Meter").unwrap(), 3936500.);
        assert_eq!(first_integer(" -4 Meter").unwrap(), -4.);
        assert_eq!(first_integer("1995-2012").unwrap(), 1995.);
        assert!(first_integer(" Meter").is_err());
    }

    #[test]
    fn test_parse() {
        let src = synthetic(8760);
        let t = TestReferenceYear::parse(&src, Path::new("TRY.dat")).unwrap();
        assert_eq!(t.easting, 3936500.);
        assert_eq!(t.northing, 2449500.);
        assert_eq!(t.altitude, 247.);
        assert_eq!(t.kind, "mittleres Jahr");
        assert_eq!(t.years.as_deref(), Some("1995-2012"));
        assert_eq!(t.columns.len(), 17);
        assert_eq!(t.rows.len(), 8760);
    }

    #[test]
    fn test_header_order_does_not_matter() {
        let reordered = synthetic(8760).replacen(
            "Rechtswert        : 3936500 Meter\nHochwert          : 2449500 Meter\n",
            "\n\nHochwert          : 2449500 Meter\n\nRechtswert        : 3936500 Meter\n",
            1,
        );
        let a = TestReferenceYear::parse(&synthetic(8760), Path::new("a")).unwrap();
        let b = TestReferenceYear::parse(&reordered, Path::new("b")).unwrap();
        assert_eq!(a.easting, b.easting);
        assert_eq!(a.northing, b.northing);
        assert_eq!(a.altitude, b.altitude);
        assert_eq!(a.kind, b.kind);
    }

    #[test]
    fn test_row_count() {
        for n in [8759, 8761] {
            match TestReferenceYear::parse(&synthetic(n), Path::new("TRY.dat")) {
                Err(DataFormatError::RowCount { found, path, .. }) => {
                    assert_eq!(found, n);
                    assert_eq!(path, Path::new("TRY.dat"));
                }
                other => panic!("expected RowCount, found {:?}", other),
            }
        }
    }

    #[test]
    fn test_missing_header() {
        let src = synthetic(8760).replace("Hoehenlage", "Hoehe");
        match TestReferenceYear::parse(&src, Path::new("TRY.dat")) {
            Err(DataFormatError::MissingHeader { field, .. }) => assert_eq!(field, "Hoehenlage"),
            other => panic!("expected MissingHeader, found {:?}", other),
        }

        let src = synthetic(8760).replace("3936500 Meter", "unbekannt");
        assert!(matches!(
            TestReferenceYear::parse(&src, Path::new("TRY.dat")),
            Err(DataFormatError::Header { .. })
        ));
    }

    #[test]
    fn test_bad_value() {
        let src = synthetic(8760).replacen("  5.0 ", " abc ", 1);
        match TestReferenceYear::parse(&src, Path::new("TRY.dat")) {
            Err(DataFormatError::Value { value, .. }) => assert_eq!(value, "abc"),
            other => panic!("expected Value, found {:?}", other),
        }
    }

    #[test]
    fn test_missing_sentinel() {
        assert!(matches!(
            TestReferenceYear::parse(HEADER.replace("***", "").as_str(), Path::new("x")),
            Err(DataFormatError::MissingSentinel { .. })
        ));
    }

    #[test]
    fn test_into_dataset() {
        let t = TestReferenceYear::parse(&synthetic(8760), Path::new("TRY.dat")).unwrap();
        let d = t.into_dataset(&EPSG_3034).unwrap();

        assert_eq!(d.records.len(), 8760);
        assert!(d.validate(Path::new("TRY.dat")).is_ok());
        assert_eq!(
            d.records[0].timestamp.to_rfc3339(),
            "2015-01-01T00:00:00+01:00"
        );
        for pair in d.records.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::hours(1));
        }

        assert!(d.location.latitude > 47. && d.location.latitude < 55.);
        assert_eq!(d.location.altitude, 247.);
        assert_eq!(d.location.utc_offset, 1.);

        let noon = &d.records[11];
        assert_abs_diff_eq!(noon.atmospheric_pressure, 98500.);
        assert_abs_diff_eq!(noon.dhi, 100.);
        assert_abs_diff_eq!(noon.ghi, 400.);
        assert_eq!(noon.wind_direction, Some(220.));
        assert!(d.adjust_timestamp);
        assert!(d.recalculate_dni);
        assert_eq!(d.timeshift_in_minutes, 30);
    }

    #[test]
    fn test_missing_column() {
        let src = synthetic(8760).replace(" RF ", " QQ ");
        let t = TestReferenceYear::parse(&src, Path::new("TRY.dat")).unwrap();
        match t.into_dataset(&EPSG_3034) {
            Err(DataFormatError::MissingColumn { column, .. }) => assert_eq!(column, "RF"),
            other => panic!("expected MissingColumn, found {:?}", other),
        }
    }
}
