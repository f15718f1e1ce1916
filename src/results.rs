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
use crate::aggregation::FleetSummary;
use crate::error::SimulationError;
use crate::Float;
use model::PlantResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The results of a plant, or of a whole fleet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PvResult {
    /// Energy produced in every hour (kWh)
    pub energy_profile: Vec<Float>,
    /// Energy produced in every hour per unit of module area (kWh/m2)
    pub energy_area_profile: Vec<Float>,
    /// Energy produced in a year (kWh)
    pub sum_of_energy_per_year: Float,
    /// Energy produced in a year per installed kWp (kWh/kWp)
    pub work_specific_energy_per_year: Float,
    /// Energy produced in a year per unit of module area (kWh/m2)
    pub area_specific_energy_per_year: Float,
}

impl From<&PlantResult> for PvResult {
    fn from(r: &PlantResult) -> Self {
        Self {
            energy_profile: r.energy_profile.clone(),
            energy_area_profile: r.area_profile(),
            sum_of_energy_per_year: r.annual_energy(),
            work_specific_energy_per_year: r.work_specific_yield(),
            area_specific_energy_per_year: r.area_specific_yield(),
        }
    }
}

impl From<&FleetSummary> for PvResult {
    fn from(s: &FleetSummary) -> Self {
        Self {
            energy_profile: s.energy_profile.clone(),
            energy_area_profile: s.area_profile.clone(),
            sum_of_energy_per_year: s.annual_energy,
            work_specific_energy_per_year: s.work_specific_yield,
            area_specific_energy_per_year: s.area_specific_yield,
        }
    }
}

/// The photovoltaic part of the results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PhotovoltaicResults {
    /// One entry per plant, in the order of the request
    pub photovoltaic_plants: Vec<PvResult>,
    /// The whole fleet
    pub summary_of_all_plants: PvResult,
}

/// Everything a simulation produces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SimulationResult {
    /// Photovoltaic results
    pub photovoltaic_results: PhotovoltaicResults,
}

impl SimulationResult {
    /// Puts together the results of the plants and their summary
    pub fn new<'a, I>(plants: I, summary: &FleetSummary) -> Self
    where
        I: IntoIterator<Item = &'a PlantResult>,
    {
        Self {
            photovoltaic_results: PhotovoltaicResults {
                photovoltaic_plants: plants.into_iter().map(PvResult::from).collect(),
                summary_of_all_plants: summary.into(),
            },
        }
    }

    /// The results of each plant
    pub fn plants(&self) -> &[PvResult] {
        &self.photovoltaic_results.photovoltaic_plants
    }

    /// The results of the whole fleet
    pub fn summary(&self) -> &PvResult {
        &self.photovoltaic_results.summary_of_all_plants
    }

    /// Serializes the results as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Writes the results as JSON into `writer`
    pub fn write_json<W: std::io::Write>(&self, writer: W) -> Result<(), serde_json::Error> {
        serde_json::to_writer(writer, self)
    }

    /// Writes the results as JSON into a file
    pub fn write_json_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SimulationError> {
        let path = path.as_ref();
        let output = |source| SimulationError::Output {
            path: path.to_path_buf(),
            source,
        };
        let file = std::fs::File::create(path).map_err(output)?;
        self.write_json(std::io::BufWriter::new(file))
            .map_err(|e| output(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results() -> SimulationResult {
        let a = PlantResult::new(vec![1., 3.], 2., 1.);
        let b = PlantResult::new(vec![0., 2.], 1., 0.5);
        let summary = FleetSummary::from_results([&a, &b]);
        SimulationResult::new([&a, &b], &summary)
    }

    #[test]
    fn test_new() {
        let r = results();
        assert_eq!(r.plants().len(), 2);
        assert_eq!(r.plants()[0].energy_area_profile, vec![0.5, 1.5]);
        assert_eq!(r.plants()[1].work_specific_energy_per_year, 4.);
        assert_eq!(r.summary().sum_of_energy_per_year, 6.);
        assert_eq!(r.summary().energy_profile, vec![1., 5.]);
    }

    #[test]
    fn test_keys() {
        let json = results().to_json().unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        let pv = &v["PhotovoltaicResults"];
        assert!(pv["PhotovoltaicPlants"].is_array());
        let summary = &pv["SummaryOfAllPlants"];
        for key in [
            "EnergyProfile",
            "EnergyAreaProfile",
            "SumOfEnergyPerYear",
            "WorkSpecificEnergyPerYear",
            "AreaSpecificEnergyPerYear",
        ] {
            assert!(summary.get(key).is_some(), "missing {}", key);
        }

        let back: SimulationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, results());
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        results().write_json_file(&path).unwrap();
        let s = std::fs::read_to_string(&path).unwrap();
        assert!(s.starts_with("{\"PhotovoltaicResults\""));

        let bad = dir.path().join("nope").join("results.json");
        assert!(matches!(
            results().write_json_file(&bad),
            Err(SimulationError::Output { .. })
        ));
    }
}
