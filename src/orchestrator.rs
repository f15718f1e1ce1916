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
use crate::error::SimulationError;
use crate::logger::Logger;
use crate::Float;
use model::{ComponentDatabasePaths, PlantResult, PlantSpec};
use photovoltaic::{
    ComponentCatalogue, ComponentDatabase, DatabaseType, EnvironmentalSeries, PhysicsEngine,
    PvSystem,
};
use weather::atmosphere::{alt2pres, gueymard94_pw};
use weather::{Preparation, WeatherDataset};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const MODULE: &str = "orchestrator";

/// Shifts the timestamps and recalculates the DNI of a dataset, as
/// requested by its flags, reporting what was done.
pub fn prepare_weather(dataset: &mut WeatherDataset, logger: &dyn Logger) -> Preparation {
    let preparation = dataset.prepare();

    if let Some(start) = preparation.shifted_start {
        logger.info(
            "weather",
            &format!(
                "timestamps shifted by {} minutes, now starting at {}",
                dataset.timeshift_in_minutes,
                start.to_rfc3339()
            ),
        );
    }
    if preparation.dni_on_unshifted_timestamps {
        logger.warning(
            "weather",
            "the DNI was recalculated without adjusting the timestamps; the position of the sun may not match the irradiance",
        );
    } else if preparation.dni_recalculated {
        logger.info("weather", "DNI recalculated");
    }

    preparation
}

/// Loads the inverter catalogue and the module catalogues
/// needed by `plants`.
///
/// Plants with an invalid catalogue selector are ignored here; they
/// fail (with their index) when simulated.
pub fn load_components(
    paths: &ComponentDatabasePaths,
    plants: &[PlantSpec],
    logger: &dyn Logger,
) -> Result<ComponentDatabase, SimulationError> {
    let inverters =
        ComponentCatalogue::from_file(&paths.inverters).map_err(SimulationError::Catalogue)?;
    logger.info(
        "components",
        &format!(
            "{} inverters read from '{}'",
            inverters.len(),
            paths.inverters.display()
        ),
    );
    let mut database = ComponentDatabase::new(inverters);

    for kind in [DatabaseType::Sandia, DatabaseType::Cec] {
        let used = plants
            .iter()
            .any(|p| matches!(p.database_type(), Ok(d) if d == kind));
        if !used {
            continue;
        }
        let path = paths.modules(kind);
        let modules = ComponentCatalogue::from_file(path).map_err(SimulationError::Catalogue)?;
        logger.info(
            "components",
            &format!(
                "{} {} modules read from '{}'",
                modules.len(),
                kind,
                path.display()
            ),
        );
        database = database.with_modules(kind, modules);
    }

    Ok(database)
}

/// The weather as seen by `plant`: irradiance reduced by its
/// losses, and its albedo.
pub fn environmental_series(dataset: &WeatherDataset, plant: &PlantSpec) -> EnvironmentalSeries {
    let factor = plant.irradiance_factor();
    let fallback_pressure = alt2pres(dataset.location.altitude);
    let n = dataset.len();

    EnvironmentalSeries {
        location: dataset.location.clone(),
        timestamps: dataset.records.iter().map(|r| r.timestamp).collect(),
        ghi: dataset.column(|r| r.ghi * factor),
        dni: dataset.column(|r| r.dni * factor),
        dhi: dataset.column(|r| r.dhi * factor),
        temp_air: dataset.column(|r| r.temp_air),
        wind_speed: dataset.column(|r| r.wind_speed),
        precipitable_water: dataset.column(|r| gueymard94_pw(r.temp_air, r.relative_humidity)),
        albedo: vec![plant.albedo; n],
        pressure: dataset.column(|r| {
            if r.atmospheric_pressure.is_finite() && r.atmospheric_pressure > 0. {
                r.atmospheric_pressure
            } else {
                fallback_pressure
            }
        }),
    }
}

/// Simulates a single plant. `index` is only used for reporting errors.
pub fn simulate_plant(
    index: usize,
    plant: &PlantSpec,
    dataset: &WeatherDataset,
    components: &ComponentDatabase,
    engine: &dyn PhysicsEngine,
) -> Result<PlantResult, SimulationError> {
    let configuration = |source| SimulationError::Configuration { index, source };

    // Components
    let database = plant.database_type().map_err(configuration)?;
    let module = components
        .module(database, &plant.module_name)
        .map_err(configuration)?;
    let inverter = components
        .inverter(&plant.inverter_name)
        .map_err(configuration)?;
    let thermal_model = plant.installation().map_err(configuration)?.thermal_model();

    let system = PvSystem {
        surface_tilt: plant.surface_tilt,
        surface_azimuth: plant.surface_azimuth,
        modules_per_string: plant.modules_per_string,
        strings_per_inverter: plant.strings_per_inverter,
        module,
        thermal_model,
        losses: plant.losses(),
    };

    // Physics
    let environment = environmental_series(dataset, plant);
    let dc = engine
        .dc_output(&system, &environment)
        .map_err(|source| SimulationError::PhysicsEngine { index, source })?;

    // AC, for all the inverters
    let n_inverters = plant.number_of_inverters as Float;
    let ac = dc.p_mp.iter().zip(dc.v_mp.iter()).map(|(p, v)| {
        let per_inverter = if plant.use_inverter_database {
            inverter.ac_power(*v, *p)
        } else {
            p * plant.inverter_eta
        };
        per_inverter * n_inverters
    });

    let n = dc.p_mp.len().max(1) as Float;
    let hours_per_step = calendar::HOURS_PER_YEAR as Float / n;
    let energy_profile = ac
        .map(|w| {
            let w = if w.is_nan() { 0. } else { w };
            let w = if plant.use_stand_by_power_inverter {
                w
            } else {
                w.max(0.)
            };
            w * hours_per_step / 1000.
        })
        .collect();

    let n_modules = plant.number_of_modules();
    Ok(PlantResult::new(
        energy_profile,
        module.area() * n_modules,
        module.rated_power() * n_modules / 1000.,
    ))
}

/// Simulates every plant, storing the results in them.
///
/// Plants are independent of each other, so (with the `parallel` feature)
/// they are simulated at the same time. This function returns once all of
/// them are done, or as soon as one of them fails.
pub fn simulate_plants(
    plants: &mut [PlantSpec],
    dataset: &WeatherDataset,
    components: &ComponentDatabase,
    engine: &dyn PhysicsEngine,
    logger: &dyn Logger,
) -> Result<(), SimulationError> {
    #[cfg(not(feature = "parallel"))]
    let aux_iter = plants.iter_mut().enumerate();
    #[cfg(feature = "parallel")]
    let aux_iter = plants.par_iter_mut().enumerate();

    aux_iter.try_for_each(|(index, plant)| -> Result<(), SimulationError> {
        plant.clear_results();
        let results = simulate_plant(index, plant, dataset, components, engine)?;
        logger.info(
            MODULE,
            &format!(
                "plant {} ('{}') produces {:.1} kWh per year",
                index,
                plant.uid,
                results.annual_energy()
            ),
        );
        plant.set_results(results);
        Ok(())
    })
}
