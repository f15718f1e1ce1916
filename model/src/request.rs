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
use crate::error::RequestError;
use crate::plant::PlantSpec;
use photovoltaic::DatabaseType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use weather::{DataFormatError, WeatherDataset};

/// A weather file, plus optional overrides of how it is prepared
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WeatherFile {
    /// The file. `.dat` files are read as Test Reference Years, and
    /// `.epw` files as EPW.
    pub file: PathBuf,

    /// Shift the timestamps? Defaults to `true`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjust_timestamp: Option<bool>,

    /// Recalculate the direct normal irradiance? Defaults to `true`
    #[serde(
        default,
        rename = "recalculateDNI",
        skip_serializing_if = "Option::is_none"
    )]
    pub recalculate_dni: Option<bool>,

    /// Minutes to shift the timestamps by. Defaults to `30`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeshift_in_minutes: Option<i64>,
}

/// Where the weather comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeatherSource {
    /// A weather file
    File(WeatherFile),

    /// A whole dataset, written in the request itself
    Inline(WeatherDataset),
}

impl WeatherSource {
    /// Reads (or takes) the dataset, checking that it is a
    /// full year of hourly data.
    pub fn load(&self) -> Result<WeatherDataset, DataFormatError> {
        match self {
            Self::File(f) => {
                let mut dataset = weather::read_weather_file(&f.file)?;
                if let Some(v) = f.adjust_timestamp {
                    dataset.adjust_timestamp = v;
                }
                if let Some(v) = f.recalculate_dni {
                    dataset.recalculate_dni = v;
                }
                if let Some(v) = f.timeshift_in_minutes {
                    dataset.timeshift_in_minutes = v;
                }
                Ok(dataset)
            }
            Self::Inline(dataset) => {
                dataset.validate(Path::new("<inline>"))?;
                Ok(dataset.clone())
            }
        }
    }
}

fn default_sandia_modules() -> PathBuf {
    PathBuf::from("./res/PV_Database/Sandia_Modules.csv")
}
fn default_cec_modules() -> PathBuf {
    PathBuf::from("./res/PV_Database/CEC_Modules.csv")
}
fn default_inverters() -> PathBuf {
    PathBuf::from("./res/PV_Database/CEC_Inverters.csv")
}

/// Where the component catalogues are
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDatabasePaths {
    /// Sandia module catalogue
    #[serde(default = "default_sandia_modules")]
    pub sandia_modules: PathBuf,

    /// CEC module catalogue
    #[serde(default = "default_cec_modules")]
    pub cec_modules: PathBuf,

    /// Inverter catalogue
    #[serde(default = "default_inverters")]
    pub inverters: PathBuf,
}

impl std::default::Default for ComponentDatabasePaths {
    fn default() -> Self {
        Self {
            sandia_modules: default_sandia_modules(),
            cec_modules: default_cec_modules(),
            inverters: default_inverters(),
        }
    }
}

impl ComponentDatabasePaths {
    /// All catalogues inside a directory, with their usual names
    pub fn in_directory<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            sandia_modules: dir.join("Sandia_Modules.csv"),
            cec_modules: dir.join("CEC_Modules.csv"),
            inverters: dir.join("CEC_Inverters.csv"),
        }
    }

    /// The module catalogue of a certain kind
    pub fn modules(&self, database: DatabaseType) -> &Path {
        match database {
            DatabaseType::Sandia => &self.sandia_modules,
            DatabaseType::Cec => &self.cec_modules,
        }
    }
}

fn new_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("./tmp")
}

/// Everything needed to run a simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    /// Identifies this simulation (e.g., in the name of the exported files)
    #[serde(default = "new_uuid")]
    pub uuid: String,

    /// Write the tabular results to [`SimulationRequest::output_directory`]?
    #[serde(default, alias = "keep_files")]
    pub keep_files: bool,

    /// Where the tabular results are written
    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,

    /// The weather
    pub weather_data: WeatherSource,

    /// The plants to simulate
    pub photovoltaic_plants: Vec<PlantSpec>,

    /// The component catalogues
    #[serde(default)]
    pub databases: ComponentDatabasePaths,
}

impl SimulationRequest {
    /// Parses a request written in JSON5 (which includes plain JSON)
    pub fn from_json5(s: &str) -> Result<Self, RequestError> {
        json5::from_str(s).map_err(|e| RequestError::Parse {
            path: PathBuf::from("<string>"),
            reason: e.to_string(),
        })
    }

    /// Reads a request from a file. Files with a `.json` extension
    /// are read as strict JSON, and everything else as JSON5.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RequestError> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| RequestError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let is_json = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let parsed = if is_json {
            serde_json::from_str(&s).map_err(|e| e.to_string())
        } else {
            json5::from_str(&s).map_err(|e| e.to_string())
        };
        parsed.map_err(|reason| RequestError::Parse {
            path: path.to_path_buf(),
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const REQUEST: &str = r#"{
        "uuid": "abc",
        "keepFiles": true,
        "weatherData": { "file": "./TRY2015.dat", "timeshiftInMinutes": 45, "recalculateDNI": false },
        "photovoltaicPlants": [
            { "uid": "a", "moduleName": "m", "inverterName": "i" },
            { "uid": "b", "moduleName": "m", "inverterName": "i", "modulesDatabaseType": 2 }
        ],
        "databases": { "inverters": "/data/inverters.csv" }
    }"#;

    #[test]
    fn test_parse() {
        let r = SimulationRequest::from_json5(REQUEST).unwrap();
        assert_eq!(r.uuid, "abc");
        assert!(r.keep_files);
        assert_eq!(r.photovoltaic_plants.len(), 2);
        match &r.weather_data {
            WeatherSource::File(f) => {
                assert_eq!(f.file, PathBuf::from("./TRY2015.dat"));
                assert_eq!(f.timeshift_in_minutes, Some(45));
                assert_eq!(f.recalculate_dni, Some(false));
                assert_eq!(f.adjust_timestamp, None);
            }
            _ => panic!("expected a file"),
        }
        assert_eq!(r.databases.inverters, PathBuf::from("/data/inverters.csv"));
        assert_eq!(
            r.databases.modules(DatabaseType::Cec),
            Path::new("./res/PV_Database/CEC_Modules.csv")
        );
        assert_eq!(r.output_directory, PathBuf::from("./tmp"));
    }

    #[test]
    fn test_defaults() {
        let a = SimulationRequest::from_json5(
            "{ weatherData: { file: 'w.epw' }, photovoltaicPlants: [] }",
        )
        .unwrap();
        let b = SimulationRequest::from_json5(
            "{ weatherData: { file: 'w.epw' }, photovoltaicPlants: [] }",
        )
        .unwrap();
        assert!(!a.keep_files);
        assert_eq!(a.databases, ComponentDatabasePaths::default());
        // Every request gets its own identifier
        assert!(!a.uuid.is_empty());
        assert_ne!(a.uuid, b.uuid);
    }

    #[test]
    fn test_snake_case_keep_files() {
        let r = SimulationRequest::from_json5(
            "{ keep_files: true, weatherData: { file: 'w.epw' }, photovoltaicPlants: [] }",
        )
        .unwrap();
        assert!(r.keep_files);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();

        let path = dir.path().join("request.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", REQUEST).unwrap();
        let r = SimulationRequest::from_file(&path).unwrap();
        assert_eq!(r.uuid, "abc");

        // JSON5 is not accepted in .json files
        let path = dir.path().join("request5.json");
        std::fs::write(&path, "{ weatherData: { file: 'w.epw' }, photovoltaicPlants: [] }").unwrap();
        assert!(matches!(
            SimulationRequest::from_file(&path),
            Err(RequestError::Parse { .. })
        ));

        let path = dir.path().join("request.json5");
        std::fs::write(&path, "{ weatherData: { file: 'w.epw' }, photovoltaicPlants: [] }").unwrap();
        assert!(SimulationRequest::from_file(&path).is_ok());

        assert!(matches!(
            SimulationRequest::from_file(dir.path().join("nope.json")),
            Err(RequestError::Read { .. })
        ));
    }

    #[test]
    fn test_missing_weather_file() {
        let source = WeatherSource::File(WeatherFile {
            file: PathBuf::from("./does/not/exist.dat"),
            adjust_timestamp: None,
            recalculate_dni: None,
            timeshift_in_minutes: None,
        });
        assert!(matches!(source.load(), Err(DataFormatError::Io { .. })));
    }

    #[test]
    fn test_inline_too_short() {
        let r = SimulationRequest::from_json5(
            r#"{
            weatherData: {
                altitude: 10, latitude: 50, longitude: 8, tz: 1,
                weatherData: {
                    timeStamps: ["2015-01-01T00:00:00+01:00", "2015-01-01T01:00:00+01:00"],
                    temp_air: [1, 2], relative_humidity: [50, 50], wind_speed: [1, 1],
                    atmospheric_pressure: [100000, 100000],
                    ghi: [0, 0], dhi: [0, 0], dni: [0, 0],
                }
            },
            photovoltaicPlants: []
        }"#,
        )
        .unwrap();
        assert!(matches!(r.weather_data, WeatherSource::Inline(_)));
        assert!(matches!(
            r.weather_data.load(),
            Err(DataFormatError::RowCount {
                found: 2,
                expected: 8760,
                ..
            })
        ));
    }
}
