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

//! This crate contains the data structures utilized for describing
//! a photovoltaic yield simulation: the weather it runs on, the plants
//! to simulate and the component catalogues to take parameters from.
//!
//! Requests are usually written in JSON (or JSON5), using the same
//! keys as the rest of the tooling.
//!
//! ```
//! use model::{SimulationRequest, WeatherSource};
//!
//! let request = SimulationRequest::from_json5(r#"{
//!     weatherData: { file: "./weather/TRY2015_Stuttgart.dat" },
//!     photovoltaicPlants: [{
//!         uid: "roof",
//!         surfaceAzimuth: 180,
//!         surfaceTilt: 30,
//!         modulesPerString: 10,
//!         stringsPerInverter: 2,
//!         numberOfInverters: 1,
//!         moduleName: "Canadian_Solar_CS5P_220M___2009_",
//!         inverterName: "ABB__MICRO_0_25_I_OUTD_US_208__208V_",
//!     }],
//! }"#).unwrap();
//!
//! assert_eq!(request.photovoltaic_plants.len(), 1);
//! assert!(matches!(request.weather_data, WeatherSource::File(_)));
//! // Defaults are filled in
//! assert_eq!(request.photovoltaic_plants[0].albedo, 0.2);
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

mod error;
pub use crate::error::RequestError;

/// The description of a photovoltaic plant
pub mod plant;
pub use crate::plant::PlantSpec;

/// What a plant produced
pub mod result;
pub use crate::result::PlantResult;

/// A whole simulation
pub mod request;
pub use crate::request::{ComponentDatabasePaths, SimulationRequest, WeatherFile, WeatherSource};
