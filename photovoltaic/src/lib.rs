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

//! Photovoltaic components and the physics that turns weather into
//! DC power.
//!
//! Modules and inverters are read from SAM-style catalogues (the CSV
//! files distributed with the System Advisor Model), and the electrical
//! behaviour of a plant is computed by a [`PhysicsEngine`]. The default
//! engine is a [`ModelChain`], which follows the usual sequence: sun
//! position, plane-of-array irradiance, incidence-angle losses, cell
//! temperature, spectral correction and maximum power point.

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

/// Errors produced when configuring or running a plant
pub mod error;
pub use crate::error::{ConfigurationError, PhysicsEngineError};

/// SAM component catalogues
pub mod database;
pub use crate::database::{
    normalize_name, ComponentCatalogue, ComponentDatabase, ComponentRecord, DatabaseType,
};

/// Module electrical parameters
pub mod module;
pub use crate::module::{CecModule, ModuleParameters, SandiaModule};

/// Module mounting and cell temperature
pub mod temperature;
pub use crate::temperature::{Installation, SapmTemperature};

/// DC to AC conversion
pub mod inverter;
pub use crate::inverter::SandiaInverter;

/// The interface between plants and the physics
pub mod engine;
pub use crate::engine::{DcOutput, EnvironmentalSeries, Losses, PhysicsEngine, PvSystem};

/// The default physics engine
pub mod model_chain;
pub use crate::model_chain::{ModelChain, PlaneOfArray};
