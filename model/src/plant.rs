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
use crate::result::PlantResult;
use crate::Float;
use photovoltaic::{ConfigurationError, DatabaseType, Installation, Losses};
use serde::{Deserialize, Serialize};

fn default_albedo() -> Float {
    0.2
}
fn default_installation() -> i64 {
    1
}
fn default_losses_irradiation() -> Float {
    1.0
}
fn default_losses_dc_datasheet() -> Float {
    2.0
}
fn default_database_type() -> i64 {
    1
}
fn default_inverter_eta() -> Float {
    0.92
}

/// A photovoltaic plant: several inverters, each of them connected to
/// the same number of strings of identical modules.
///
/// ```
/// use model::PlantSpec;
///
/// let plant: PlantSpec = json5::from_str("{
///     uid: 'carport',
///     surfaceTilt: 10,
///     modulesPerString: 8,
///     stringsPerInverter: 1,
///     numberOfInverters: 3,
///     moduleName: 'Some module',
///     inverterName: 'Some inverter',
/// }").unwrap();
///
/// assert_eq!(plant.number_of_modules(), 24.);
/// assert!(plant.results().is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlantSpec {
    /// The name of the plant
    pub uid: String,

    /// Orientation of the modules, in degrees clockwise from the
    /// North (i.e., 180 means facing South)
    #[serde(default)]
    pub surface_azimuth: Float,

    /// Tilt of the modules from the horizontal, in degrees
    #[serde(default)]
    pub surface_tilt: Float,

    /// Modules in each string
    #[serde(default)]
    pub modules_per_string: Float,

    /// Strings connected to each inverter
    #[serde(default)]
    pub strings_per_inverter: u32,

    /// Number of inverters
    #[serde(default)]
    pub number_of_inverters: u32,

    /// Reflectance of the ground
    #[serde(default = "default_albedo")]
    pub albedo: Float,

    /// How the modules are mounted (`1` to `4`, see [`Installation`])
    #[serde(default = "default_installation")]
    pub module_installation: i64,

    /// Name of the module in the selected catalogue
    pub module_name: String,

    /// Irradiance lost before reaching the modules (e.g., by soiling), in %
    #[serde(default = "default_losses_irradiation")]
    pub losses_irradiation: Float,

    /// Mismatch losses, in %
    #[serde(default = "default_losses_dc_datasheet", rename = "lossesDCDatasheet")]
    pub losses_dc_datasheet: Float,

    /// Ohmic losses in the DC cables at Standard Test Conditions, in %
    #[serde(default, rename = "lossesDCCables")]
    pub losses_dc_cables: Float,

    /// Which module catalogue to use: `1` for Sandia, `2` for CEC
    #[serde(default = "default_database_type")]
    pub modules_database_type: i64,

    /// Use the inverter model from the catalogue? Otherwise, a
    /// constant efficiency ([`PlantSpec::inverter_eta`]) is used.
    #[serde(default)]
    pub use_inverter_database: bool,

    /// Name of the inverter in the catalogue
    pub inverter_name: String,

    /// Keep the (negative) power consumed by the inverters at night?
    #[serde(default)]
    pub use_stand_by_power_inverter: bool,

    /// Efficiency of the inverters, when the catalogue model is not used
    #[serde(default = "default_inverter_eta")]
    pub inverter_eta: Float,

    #[serde(skip)]
    results: Option<PlantResult>,
}

impl PlantSpec {
    /// The module catalogue selected for this plant
    pub fn database_type(&self) -> Result<DatabaseType, ConfigurationError> {
        DatabaseType::from_selector(self.modules_database_type)
    }

    /// How the modules of this plant are mounted
    pub fn installation(&self) -> Result<Installation, ConfigurationError> {
        Installation::from_selector(self.module_installation)
    }

    /// Modules connected to each inverter
    pub fn modules_per_inverter(&self) -> Float {
        self.modules_per_string * self.strings_per_inverter as Float
    }

    /// Total number of modules in the plant
    pub fn number_of_modules(&self) -> Float {
        self.modules_per_inverter() * self.number_of_inverters as Float
    }

    /// The fraction of the irradiance that reaches the modules
    pub fn irradiance_factor(&self) -> Float {
        1. - self.losses_irradiation / 100.
    }

    /// The DC losses
    pub fn losses(&self) -> Losses {
        Losses {
            dc_ohmic_percent: self.losses_dc_cables,
            mismatch_percent: self.losses_dc_datasheet,
        }
    }

    /// The results of the last simulation, if any
    pub fn results(&self) -> Option<&PlantResult> {
        self.results.as_ref()
    }

    /// Stores the results of a simulation
    pub fn set_results(&mut self, results: PlantResult) {
        self.results = Some(results)
    }

    /// Forgets the results of the last simulation
    pub fn clear_results(&mut self) {
        self.results = None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> PlantSpec {
        json5::from_str(
            "{
                uid: 'a',
                moduleName: 'm',
                inverterName: 'i',
            }",
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let p = minimal();
        assert_eq!(p.surface_azimuth, 0.);
        assert_eq!(p.surface_tilt, 0.);
        assert_eq!(p.albedo, 0.2);
        assert_eq!(p.module_installation, 1);
        assert_eq!(p.losses_irradiation, 1.0);
        assert_eq!(p.losses_dc_datasheet, 2.0);
        assert_eq!(p.losses_dc_cables, 0.0);
        assert_eq!(p.modules_database_type, 1);
        assert!(!p.use_inverter_database);
        assert!(!p.use_stand_by_power_inverter);
        assert_eq!(p.inverter_eta, 0.92);
        assert!(p.results().is_none());
    }

    #[test]
    fn test_missing_names() {
        let r: Result<PlantSpec, _> = json5::from_str("{ uid: 'a', moduleName: 'm' }");
        assert!(r.is_err());
    }

    #[test]
    fn test_keys() {
        let p: PlantSpec = serde_json::from_str(
            r#"{
                "uid": "b",
                "moduleName": "m",
                "inverterName": "i",
                "lossesDCDatasheet": 3.5,
                "lossesDCCables": 1.5,
                "useStandByPowerInverter": true,
                "modulesDatabaseType": 2,
                "moduleInstallation": 4
            }"#,
        )
        .unwrap();
        assert_eq!(
            p.losses(),
            Losses {
                dc_ohmic_percent: 1.5,
                mismatch_percent: 3.5
            }
        );
        assert!(p.use_stand_by_power_inverter);
        assert_eq!(p.database_type().unwrap(), DatabaseType::Cec);
        assert_eq!(
            p.installation().unwrap(),
            Installation::InsulatedBackGlassPolymer
        );
    }

    #[test]
    fn test_selectors() {
        let mut p = minimal();
        p.modules_database_type = 7;
        assert!(matches!(
            p.database_type(),
            Err(ConfigurationError::UnknownDatabaseType(7))
        ));
        p.module_installation = 9;
        assert!(matches!(
            p.installation(),
            Err(ConfigurationError::UnknownInstallation(9))
        ));
    }

    #[test]
    fn test_counts() {
        let mut p = minimal();
        p.modules_per_string = 12.;
        p.strings_per_inverter = 3;
        p.number_of_inverters = 2;
        assert_eq!(p.modules_per_inverter(), 36.);
        assert_eq!(p.number_of_modules(), 72.);

        p.losses_irradiation = 5.;
        assert_eq!(p.irradiance_factor(), 0.95);
    }

    #[test]
    fn test_results() {
        let mut p = minimal();
        p.set_results(PlantResult::new(vec![1., 2.], 10., 2.));
        assert_eq!(p.results().unwrap().annual_energy(), 3.);
        p.clear_results();
        assert!(p.results().is_none());
    }
}
