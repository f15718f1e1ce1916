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
use crate::Float;
use model::{PlantResult, PlantSpec};

/// The results of a whole fleet of plants
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FleetSummary {
    /// Energy produced by all the plants in every hour (kWh)
    pub energy_profile: Vec<Float>,

    /// The arithmetic mean of the area profiles of the
    /// plants, in every hour (kWh/m2)
    pub area_profile: Vec<Float>,

    /// Energy produced by all the plants in a year (kWh)
    pub annual_energy: Float,

    /// Rated power of all the plants (kWp)
    pub rated_power: Float,

    /// Module area of all the plants (m2)
    pub surface_area: Float,

    /// `annual_energy / rated_power` (kWh/kWp)
    pub work_specific_yield: Float,

    /// `annual_energy / surface_area` (kWh/m2)
    pub area_specific_yield: Float,
}

/// Adds `values` into `into`, elementwise, growing `into` if needed
fn add_into(into: &mut Vec<Float>, values: &[Float]) {
    if into.len() < values.len() {
        into.resize(values.len(), 0.);
    }
    for (a, b) in into.iter_mut().zip(values) {
        *a += b;
    }
}

impl FleetSummary {
    /// Aggregates a set of plant results. Profiles of different
    /// lengths are padded with zeroes.
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a PlantResult>,
    {
        let mut ret = Self::default();
        let mut n = 0;
        for r in results {
            n += 1;
            add_into(&mut ret.energy_profile, &r.energy_profile);
            add_into(&mut ret.area_profile, &r.area_profile());
            ret.annual_energy += r.annual_energy();
            ret.rated_power += r.rated_power;
            ret.surface_area += r.surface_area;
        }
        if n > 0 {
            let n = n as Float;
            ret.area_profile.iter_mut().for_each(|v| *v /= n);
        }
        if ret.rated_power > 0. {
            ret.work_specific_yield = ret.annual_energy / ret.rated_power;
        }
        if ret.surface_area > 0. {
            ret.area_specific_yield = ret.annual_energy / ret.surface_area;
        }
        ret
    }
}

/// Aggregates the results stored in `plants`. Every plant must
/// have been simulated.
pub fn aggregate(plants: &[PlantSpec]) -> Result<FleetSummary, SimulationError> {
    if plants.is_empty() {
        return Err(SimulationError::EmptyFleet);
    }
    let results = plants
        .iter()
        .enumerate()
        .map(|(index, p)| p.results().ok_or(SimulationError::MissingResults { index }))
        .collect::<Result<Vec<&PlantResult>, _>>()?;

    Ok(FleetSummary::from_results(results))
}
