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
use model::RequestError;
use photovoltaic::{ConfigurationError, PhysicsEngineError};
use std::path::PathBuf;
use thiserror::Error;
use weather::DataFormatError;

/// Everything that can stop a simulation. Plant indices start at 0.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The weather could not be read
    #[error(transparent)]
    DataFormat(#[from] DataFormatError),

    /// The request could not be read
    #[error(transparent)]
    Request(#[from] RequestError),

    /// There is nothing to simulate
    #[error("the request contains no photovoltaic plants")]
    EmptyFleet,

    /// A component catalogue could not be loaded
    #[error("{0}")]
    Catalogue(#[source] ConfigurationError),

    /// A plant could not be set up
    #[error("photovoltaic plant {index}: {source}")]
    Configuration {
        /// The plant
        index: usize,
        /// What went wrong
        #[source]
        source: ConfigurationError,
    },

    /// The physics engine failed
    #[error("photovoltaic plant {index}: the physics engine failed: {source}")]
    PhysicsEngine {
        /// The plant
        index: usize,
        /// What went wrong
        #[source]
        source: PhysicsEngineError,
    },

    /// Results were requested from a plant that was not simulated
    #[error("photovoltaic plant {index} has no results")]
    MissingResults {
        /// The plant
        index: usize,
    },

    /// The results could not be written
    #[error("could not write '{}': {source}", path.display())]
    Output {
        /// The file
        path: PathBuf,
        /// The underlying cause
        #[source]
        source: std::io::Error,
    },
}

impl SimulationError {
    /// The index of the plant that caused the error, if any
    pub fn plant_index(&self) -> Option<usize> {
        match self {
            Self::Configuration { index, .. }
            | Self::PhysicsEngine { index, .. }
            | Self::MissingResults { index } => Some(*index),
            _ => None,
        }
    }
}
