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
use crate::error::ConfigurationError;
use crate::inverter::SandiaInverter;
use crate::module::ModuleParameters;
use crate::Float;

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

/// The module catalogues a plant can choose from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseType {
    /// Sandia Array Performance Model parameters (selector `1`)
    Sandia,

    /// California Energy Commission parameters (selector `2`)
    Cec,
}

impl DatabaseType {
    /// Interprets the selector used in plant descriptions
    pub fn from_selector(selector: i64) -> Result<Self, ConfigurationError> {
        match selector {
            1 => Ok(Self::Sandia),
            2 => Ok(Self::Cec),
            _ => Err(ConfigurationError::UnknownDatabaseType(selector)),
        }
    }
}

impl std::fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sandia => write!(f, "Sandia"),
            Self::Cec => write!(f, "CEC"),
        }
    }
}

/// Transforms a catalogue name into the identifier used to look it up.
///
/// Spaces, punctuation and brackets become underscores, so
/// `"Canadian Solar CS5P-220M [ 2009]"` becomes
/// `"Canadian_Solar_CS5P_220M___2009_"`.
pub fn normalize_name(name: &str) -> String {
    const REPLACED: &str = " -.()[]:+/\",";
    name.chars()
        .map(|c| if REPLACED.contains(c) { '_' } else { c })
        .collect()
}

/// A row of a catalogue. Only numeric values are kept.
#[derive(Debug, Clone, Default)]
pub struct ComponentRecord {
    name: String,
    values: HashMap<String, Float>,
}

impl ComponentRecord {
    /// The (normalized) name of the component
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets a numeric parameter
    pub fn get(&self, field: &str) -> Option<Float> {
        self.values.get(field).copied()
    }

    /// Gets a numeric parameter, failing if it is not there
    pub fn require(&self, field: &str) -> Result<Float, ConfigurationError> {
        self.get(field)
            .ok_or_else(|| ConfigurationError::MissingParameter {
                component: self.name.clone(),
                field: field.to_string(),
            })
    }
}

/// A SAM component catalogue.
///
/// The first row holds the column names (the first column being the
/// name of the component), and the two rows that follow hold units and
/// other metadata, which are ignored.
#[derive(Debug, Clone, Default)]
pub struct ComponentCatalogue {
    path: PathBuf,
    names: Vec<String>,
    records: HashMap<String, ComponentRecord>,
}

impl ComponentCatalogue {
    /// Number of rows that follow the header and do not contain components
    const METADATA_ROWS: usize = 2;

    /// Reads a catalogue from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| ConfigurationError::Database {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_reader(file, path)
    }

    /// Reads a catalogue from any reader. The `path` is used
    /// for error reporting.
    pub fn from_reader<R: Read>(reader: R, path: &Path) -> Result<Self, ConfigurationError> {
        let err = |e: csv::Error| ConfigurationError::Database {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = rdr.headers().map_err(err)?.clone();

        let mut ret = Self {
            path: path.to_path_buf(),
            ..Self::default()
        };
        for row in rdr.records().skip(Self::METADATA_ROWS) {
            let row = row.map_err(err)?;
            let name = match row.get(0).map(str::trim) {
                Some(n) if !n.is_empty() => normalize_name(n),
                _ => continue,
            };

            let values = headers
                .iter()
                .zip(row.iter())
                .skip(1)
                .filter_map(|(h, v)| Some((h.trim().to_string(), v.trim().parse::<Float>().ok()?)))
                .collect();

            if ret.records.contains_key(&name) {
                // SAM catalogues contain a few duplicates... keep the first one
                continue;
            }
            ret.names.push(name.clone());
            ret.records.insert(name.clone(), ComponentRecord { name, values });
        }

        if ret.records.is_empty() {
            return Err(ConfigurationError::Database {
                path: path.to_path_buf(),
                reason: "the catalogue contains no components".to_string(),
            });
        }
        Ok(ret)
    }

    /// The file this catalogue was read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Finds a component. The name can be given either as it
    /// appears in the catalogue or already normalized.
    pub fn get(&self, name: &str) -> Option<&ComponentRecord> {
        self.records.get(&normalize_name(name.trim()))
    }

    /// The normalized names of all components, in catalogue order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of components
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Is this catalogue empty?
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// The catalogues available to a simulation: one inverter catalogue
/// and (at least) one module catalogue.
#[derive(Debug, Clone, Default)]
pub struct ComponentDatabase {
    modules: HashMap<DatabaseType, ComponentCatalogue>,
    inverters: ComponentCatalogue,
}

impl ComponentDatabase {
    /// Creates a database with an inverter catalogue and no modules
    pub fn new(inverters: ComponentCatalogue) -> Self {
        Self {
            modules: HashMap::new(),
            inverters,
        }
    }

    /// Registers a module catalogue
    pub fn with_modules(mut self, database: DatabaseType, modules: ComponentCatalogue) -> Self {
        self.modules.insert(database, modules);
        self
    }

    /// The module catalogue of a certain type, if it was loaded
    pub fn modules(&self, database: DatabaseType) -> Option<&ComponentCatalogue> {
        self.modules.get(&database)
    }

    /// The inverter catalogue
    pub fn inverters(&self) -> &ComponentCatalogue {
        &self.inverters
    }

    /// Finds a module and reads its parameters
    pub fn module(
        &self,
        database: DatabaseType,
        name: &str,
    ) -> Result<ModuleParameters, ConfigurationError> {
        let record = self
            .modules(database)
            .and_then(|c| c.get(name))
            .ok_or_else(|| ConfigurationError::UnknownModule {
                name: name.to_string(),
                database,
            })?;
        ModuleParameters::from_record(database, record)
    }

    /// Finds an inverter and reads its parameters
    pub fn inverter(&self, name: &str) -> Result<SandiaInverter, ConfigurationError> {
        let record =
            self.inverters
                .get(name)
                .ok_or_else(|| ConfigurationError::UnknownInverter {
                    name: name.to_string(),
                })?;
        SandiaInverter::from_record(record)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SANDIA_MODULES: &str = "\
Name,Vintage,Area,Material,Cells_in_Series,Parallel_Strings,Isco,Voco,Impo,Vmpo,Aisc,Aimp,C0,C1,Bvoco,Mbvoc,Bvmpo,Mbvmp,N,C2,C3,A0,A1,A2,A3,A4,B0,B1,B2,B3,B4,B5,DTC,FD,A,B,C4,C5,IXO,IXXO,C6,C7,Notes
Units,,m2,,,,A,V,A,V,1/C,1/C,,,V/C,V/C,V/C,V/C,,,1/V,,,,,,,,,,,,C,,,,,,,,,,
[0],,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,
Canadian Solar CS5P-220M [ 2009],2009,1.701,c-Si,96,1,5.09115,59.2608,4.54629,48.3156,0.000397,0.000181,1.01284,-0.0128398,-0.21696,0,-0.235488,0,1.4032,-0.151172,-8.96,0.928385,0.068093,-0.0157738,0.0016606,-6.93E-05,1,-0.002438,0.0003103,-1.246E-05,2.11E-07,-1.36E-09,3,1,-3.40641,-0.0842075,0.996446,0.003554,4.97599,3.18809,1.15535,-0.155353,Source: Sandia National Laboratories Updated 9/25/2012 10:10:54 AM
";

    pub(crate) const CEC_MODULES: &str = "\
Name,Technology,Bifacial,STC,PTC,A_c,Length,Width,N_s,I_sc_ref,V_oc_ref,I_mp_ref,V_mp_ref,alpha_sc,beta_oc,T_NOCT,a_ref,I_L_ref,I_o_ref,R_s,R_sh_ref,Adjust,gamma_r,BIPV,Version,Date
Units,,,W,W,m2,m,m,,A,V,A,V,A/K,V/K,C,V,A,A,Ohm,Ohm,%,%/K,,,
[0],,,,,,,,,,,,,,,,,,,,,,,,,
Example Solar ES-300 (60 cell),Mono-c-Si,0,300.0,275.1,1.7,1.65,1.0,60,9.8,39.5,9.3,32.3,0.0049,-0.118,45.0,1.6,9.81,1.5e-10,0.31,300.0,8.0,-0.39,N,SAM 2018.11.11 r2,1/3/2019
";

    pub(crate) const INVERTERS: &str = "\
Name,Vac,Pso,Paco,Pdco,Vdco,C0,C1,C2,C3,Pnt,Vdcmax,Idcmax,Mppt_low,Mppt_high,CEC_Date,CEC_Type
Units,V,W,W,W,V,1/W,1/V,1/V,1/V,W,V,A,V,V,,
[0],,,,,,,,,,,,,,,,
ABB: MICRO-0.25-I-OUTD-US-208 [208V],208,2.089607,250,259.588593,40,-4.1e-05,-9.1e-05,0.000494,-0.013171,0.075,50,6.489715,30,50,,Utility Interactive
";

    #[test]
    fn test_normalize_name() {
        assert_eq!(
            normalize_name("Canadian Solar CS5P-220M [ 2009]"),
            "Canadian_Solar_CS5P_220M___2009_"
        );
        assert_eq!(
            normalize_name("ABB: MICRO-0.25-I-OUTD-US-208 [208V]"),
            "ABB__MICRO_0_25_I_OUTD_US_208__208V_"
        );
        assert_eq!(normalize_name("Already_Normal"), "Already_Normal");
    }

    #[test]
    fn test_selector() {
        assert_eq!(DatabaseType::from_selector(1).unwrap(), DatabaseType::Sandia);
        assert_eq!(DatabaseType::from_selector(2).unwrap(), DatabaseType::Cec);
        assert!(matches!(
            DatabaseType::from_selector(7),
            Err(ConfigurationError::UnknownDatabaseType(7))
        ));
    }

    #[test]
    fn test_read_catalogue() {
        let cat = ComponentCatalogue::from_reader(SANDIA_MODULES.as_bytes(), Path::new("modules.csv"))
            .unwrap();
        assert_eq!(cat.len(), 1);
        assert_eq!(cat.names()[0], "Canadian_Solar_CS5P_220M___2009_");

        // Either name works
        let by_raw = cat.get("Canadian Solar CS5P-220M [ 2009]").unwrap();
        let by_normal = cat.get("Canadian_Solar_CS5P_220M___2009_").unwrap();
        assert_eq!(by_raw.name(), by_normal.name());

        assert_eq!(by_raw.get("Area"), Some(1.701));
        assert_eq!(by_raw.get("Cells_in_Series"), Some(96.));
        // Text columns are not kept
        assert!(by_raw.get("Material").is_none());
        assert!(matches!(
            by_raw.require("Material"),
            Err(ConfigurationError::MissingParameter { .. })
        ));
    }

    #[test]
    fn test_empty_catalogue() {
        let src = "Name,Area\nUnits,m2\n[0],\n";
        assert!(matches!(
            ComponentCatalogue::from_reader(src.as_bytes(), Path::new("empty.csv")),
            Err(ConfigurationError::Database { .. })
        ));
    }

    #[test]
    fn test_catalogue_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CEC_Inverters.csv");
        std::fs::write(&path, INVERTERS).unwrap();
        let cat = ComponentCatalogue::from_file(&path).unwrap();
        assert_eq!(cat.path(), path.as_path());
        assert!(cat.get("ABB__MICRO_0_25_I_OUTD_US_208__208V_").is_some());

        assert!(matches!(
            ComponentCatalogue::from_file(dir.path().join("missing.csv")),
            Err(ConfigurationError::Database { .. })
        ));
    }

    #[test]
    fn test_database_lookup() {
        let inverters =
            ComponentCatalogue::from_reader(INVERTERS.as_bytes(), Path::new("inv.csv")).unwrap();
        let cec = ComponentCatalogue::from_reader(CEC_MODULES.as_bytes(), Path::new("cec.csv"))
            .unwrap();
        let db = ComponentDatabase::new(inverters).with_modules(DatabaseType::Cec, cec);

        assert!(db.module(DatabaseType::Cec, "Example Solar ES-300 (60 cell)").is_ok());
        // Sandia catalogue was never loaded
        assert!(matches!(
            db.module(DatabaseType::Sandia, "Example Solar ES-300 (60 cell)"),
            Err(ConfigurationError::UnknownModule {
                database: DatabaseType::Sandia,
                ..
            })
        ));
        assert!(matches!(
            db.module(DatabaseType::Cec, "Nope"),
            Err(ConfigurationError::UnknownModule { .. })
        ));

        assert!(db.inverter("ABB: MICRO-0.25-I-OUTD-US-208 [208V]").is_ok());
        assert!(matches!(
            db.inverter("Nope"),
            Err(ConfigurationError::UnknownInverter { .. })
        ));
    }
}
