/*
MIT License
Copyright (c)  Germán Molina
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

//! The main `pvyield` crate, putting every other crate together.
//!
//! It reads the weather, simulates any number of photovoltaic plants on
//! it (at the same time, with the `parallel` feature) and summarizes the
//! results of the whole fleet.
//!
//! ```no_run
//! use pvyield::{run_simulation::run, ModelChain, SimulationRequest, TracingLogger};
//!
//! let mut request = SimulationRequest::from_file("./request.json5").unwrap();
//! let results = run(&mut request, &ModelChain::default(), &TracingLogger).unwrap();
//! println!("{}", results.summary().sum_of_energy_per_year);
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

/// Receives the messages produced during a simulation
pub mod logger;
pub use logger::{Level, Logger, RecordingLogger, TracingLogger};

/// Everything that can go wrong
pub mod error;
pub use error::SimulationError;

/// Simulates each plant
pub mod orchestrator;

/// Puts the results of several plants together
pub mod aggregation;
pub use aggregation::FleetSummary;

/// The results, as given to the user
pub mod results;
pub use results::{PhotovoltaicResults, PvResult, SimulationResult};

/// Tabular outputs
pub mod export;

/// A module with some useful functions to run a simulation
pub mod run_simulation;

// Re-exports
pub use calendar::{Date, Period, Timestamp};
pub use model::{
    ComponentDatabasePaths, PlantResult, PlantSpec, RequestError, SimulationRequest,
    WeatherFile, WeatherSource,
};
pub use photovoltaic::{
    ComponentDatabase, ConfigurationError, DcOutput, EnvironmentalSeries, ModelChain,
    PhysicsEngine, PhysicsEngineError, PvSystem,
};
pub use weather::{read_weather_file, DataFormatError, Location, WeatherDataset, WeatherRecord};
