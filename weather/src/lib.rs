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
#![deny(missing_docs)]

//! Hourly weather data for energy-yield simulations.
//!
//! This library reads German Test Reference Years (TRY) and
//! [EPW files](https://energyplus.net/weather) into a common
//! [`WeatherDataset`], and prepares them for simulation (i.e., shifting
//! the timestamps and recalculating the direct normal irradiance).
//!
//! ```no_run
//! use weather::read_weather_file;
//!
//! let mut dataset = read_weather_file("./TRY2015_37842001475500_Jahr.dat").unwrap();
//! let preparation = dataset.prepare();
//! assert!(preparation.dni_recalculated);
//! ```

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(feature = "float")]
pub type Float = f32;

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(not(feature = "float"))]
pub type Float = f64;

#[cfg(feature = "float")]
const PI: Float = std::f32::consts::PI;

#[cfg(not(feature = "float"))]
const PI: Float = std::f64::consts::PI;

/// Solar calculations library. Based on Duffie and Beckman's excellent book.
///
/// We follow the convention of the book. This means that everything is in
/// international units, and times are solar. Angles (inputs and outputs) are
/// in Radians.
///
/// Solar azimuth angle is the angular displacement from south of the
/// projection of beam radiation on the horizontal plane (Figure 1.6.1 of the Book).
/// Displacements east of south are negative and west of south are positive.
pub mod solar;
pub use self::solar::{Solar, SunPosition, Time};

/// Data associated to a specific Location
pub mod location;
pub use crate::location::Location;

/// Errors found when reading weather data
pub mod error;
pub use crate::error::DataFormatError;

/// A single row of weather data
pub mod record;
pub use crate::record::WeatherRecord;

/// A whole year of weather data
pub mod dataset;
pub use crate::dataset::{Preparation, WeatherDataset};

/// Pressure, air mass and precipitable water
pub mod atmosphere;

/// Irradiance components
pub mod irradiance;

/// Projected to geographic coordinates
pub mod geodesy;
pub use crate::geodesy::{CoordinateTransform, LambertConformalConic, EPSG_3034};

/// For handling German Test Reference Year files
pub mod try_file;
pub use crate::try_file::TestReferenceYear;

/// For handling EPW Files
pub mod epw;
pub use epw::{weather::EPWWeather, weather_line::EPWWeatherLine};

pub use calendar::{Date, Timestamp};

use std::path::Path;

/// Reads a weather file into a [`WeatherDataset`]. The format is inferred
/// from the extension: `.dat` files are Test Reference Years and `.epw`
/// files are EPW.
///
/// The dataset is validated (i.e., a full year of hourly records) but
/// not prepared.
pub fn read_weather_file<P: AsRef<Path>>(path: P) -> Result<WeatherDataset, DataFormatError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let dataset = match extension.as_deref() {
        Some("dat") => TestReferenceYear::from_file(path)?.into_dataset(&EPSG_3034)?,
        Some("epw") => EPWWeather::from_file(path)?.into_dataset()?,
        _ => {
            return Err(DataFormatError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };
    dataset.validate(path)?;
    Ok(dataset)
}
