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
use crate::database::DatabaseType;
use crate::Float;
use std::path::PathBuf;
use thiserror::Error;

/// A plant that cannot be set up: unknown selectors, components
/// that are not in the catalogues, or catalogues that cannot be read.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The module database selector is neither 1 (Sandia) nor 2 (CEC)
    #[error("unknown modules database type {0} (expected 1 for Sandia or 2 for CEC)")]
    UnknownDatabaseType(i64),

    /// The module installation is not between 1 and 4
    #[error("unknown module installation {0} (expected a value between 1 and 4)")]
    UnknownInstallation(i64),

    /// The module is not in the selected catalogue
    #[error("module '{name}' not found in the {database} modules database")]
    UnknownModule {
        /// The requested name
        name: String,
        /// The catalogue searched
        database: DatabaseType,
    },

    /// The inverter is not in the inverter catalogue
    #[error("inverter '{name}' not found in the inverters database")]
    UnknownInverter {
        /// The requested name
        name: String,
    },

    /// The catalogue could not be read
    #[error("could not read component database '{}': {reason}", path.display())]
    Database {
        /// The catalogue file
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// A component lacks a parameter the models need
    #[error("parameter '{field}' of component '{component}' is missing or is not a number")]
    MissingParameter {
        /// The component name
        component: String,
        /// The parameter (i.e., the catalogue column)
        field: String,
    },
}

/// Failures raised by a [`crate::PhysicsEngine`]
#[derive(Debug, Error)]
pub enum PhysicsEngineError {
    /// One of the environmental series does not match the timestamps
    #[error("environmental series '{series}' has {found} values, expected {expected}")]
    SeriesLength {
        /// The series name
        series: &'static str,
        /// Number of timestamps
        expected: usize,
        /// Number of values
        found: usize,
    },

    /// A system parameter is out of its physical range
    #[error("invalid value {value} for '{field}'")]
    InvalidParameter {
        /// The parameter
        field: &'static str,
        /// Its value
        value: Float,
    },
}
