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
use crate::aggregation::aggregate;
use crate::error::SimulationError;
use crate::logger::Logger;
use crate::orchestrator::{load_components, prepare_weather, simulate_plants};
use crate::results::SimulationResult;
use clap::{Parser, Subcommand};
use model::{ComponentDatabasePaths, SimulationRequest};
use photovoltaic::PhysicsEngine;
use std::path::{Path, PathBuf};

const MODULE: &str = "simulation";

/// The options we can pass to the program
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct SimOptions {
    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// The things the program can do
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Simulates the plants described in a request
    Simulate {
        /// The request, in JSON or JSON5
        #[arg(short = 'i')]
        input: PathBuf,

        /// Specifies the path to which to write the results.
        /// If none is given, STDOUT is used
        #[arg(short = 'o')]
        output: Option<PathBuf>,
    },

    /// Writes the names of the modules and inverters in the
    /// catalogues, as they should be written in a request
    Components {
        /// The directory containing `CEC_Modules.csv`, `CEC_Inverters.csv`
        /// and, optionally, `Sandia_Modules.csv`
        #[arg(long, default_value = "./res/PV_Database")]
        databases: PathBuf,

        /// Where to write the lists. Defaults to the `databases` directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Runs a whole simulation: prepares the weather, simulates every plant
/// and puts the results together. If the request says so, the results are
/// also written as tables.
///
/// The results of each plant are also stored in `request`.
pub fn run(
    request: &mut SimulationRequest,
    engine: &dyn PhysicsEngine,
    logger: &dyn Logger,
) -> Result<SimulationResult, SimulationError> {
    if request.photovoltaic_plants.is_empty() {
        return Err(SimulationError::EmptyFleet);
    }

    let mut dataset = request.weather_data.load()?;
    logger.info(
        "weather",
        &format!(
            "{} weather records loaded ({}, lat {:.3}, lon {:.3})",
            dataset.len(),
            dataset.kind,
            dataset.location.latitude,
            dataset.location.longitude
        ),
    );
    prepare_weather(&mut dataset, logger);

    let components = load_components(&request.databases, &request.photovoltaic_plants, logger)?;

    logger.info(
        MODULE,
        &format!(
            "simulating {} photovoltaic plant(s) with the {} engine",
            request.photovoltaic_plants.len(),
            engine.name()
        ),
    );
    simulate_plants(
        &mut request.photovoltaic_plants,
        &dataset,
        &components,
        engine,
        logger,
    )?;
    logger.info(MODULE, "finished");

    let summary = aggregate(&request.photovoltaic_plants)?;
    let results = SimulationResult::new(
        request
            .photovoltaic_plants
            .iter()
            .filter_map(|p| p.results()),
        &summary,
    );

    if request.keep_files {
        let [profiles, summary] =
            crate::export::export_tables(&results, &request.output_directory, &request.uuid)?;
        logger.info(
            MODULE,
            &format!(
                "tables written to '{}' and '{}'",
                profiles.display(),
                summary.display()
            ),
        );
    }

    Ok(results)
}

/// Reads a request from a file and runs it
pub fn run_file<P: AsRef<Path>>(
    path: P,
    engine: &dyn PhysicsEngine,
    logger: &dyn Logger,
) -> Result<SimulationResult, SimulationError> {
    let mut request = SimulationRequest::from_file(path)?;
    run(&mut request, engine, logger)
}

/// Lists the components in the catalogues found in `databases`, writing
/// the lists into `out`. Files are prefixed with today's date.
pub fn list_components(
    databases: &Path,
    out: &Path,
    logger: &dyn Logger,
) -> Result<Vec<PathBuf>, SimulationError> {
    let date = calendar::chrono::Local::now()
        .date_naive()
        .format("%Y-%m-%d")
        .to_string();
    let paths = ComponentDatabasePaths::in_directory(databases);
    let written = crate::export::list_components(&paths, out, &date)?;
    for path in &written {
        logger.info("components", &format!("names written to '{}'", path.display()));
    }
    Ok(written)
}
