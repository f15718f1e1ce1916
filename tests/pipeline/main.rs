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
use approx::assert_relative_eq;
use pvyield::run_simulation::run;
use pvyield::{
    ComponentDatabasePaths, ConfigurationError, DcOutput, EnvironmentalSeries, Float, Level,
    ModelChain, PhysicsEngine, PhysicsEngineError, PlantSpec, PvSystem, RecordingLogger,
    SimulationError, SimulationRequest, SimulationResult, WeatherFile, WeatherSource,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TRY_HEADER: &str = "Koordinatensystem : Lambert konform konisch
Rechtswert        : 3936500 Meter
Hochwert          : 2449500 Meter
Hoehenlage        : 247 Meter ueber NN

Art des TRY       : mittleres Jahr
Bezugszeitraum    : 1995-2012

    RW      HW MM DD HH     t    p  WR   WG N    x  RF    B    D   A    E IL
***
";

const SANDIA_MODULES: &str = "\
Name,Vintage,Area,Material,Cells_in_Series,Parallel_Strings,Isco,Voco,Impo,Vmpo,Aisc,Aimp,C0,C1,Bvoco,Mbvoc,Bvmpo,Mbvmp,N,C2,C3,A0,A1,A2,A3,A4,B0,B1,B2,B3,B4,B5,DTC,FD,A,B,C4,C5,IXO,IXXO,C6,C7,Notes
Units,,m2,,,,A,V,A,V,1/C,1/C,,,V/C,V/C,V/C,V/C,,,1/V,,,,,,,,,,,,C,,,,,,,,,,
[0],,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,,
Canadian Solar CS5P-220M [ 2009],2009,1.701,c-Si,96,1,5.09115,59.2608,4.54629,48.3156,0.000397,0.000181,1.01284,-0.0128398,-0.21696,0,-0.235488,0,1.4032,-0.151172,-8.96,0.928385,0.068093,-0.0157738,0.0016606,-6.93E-05,1,-0.002438,0.0003103,-1.246E-05,2.11E-07,-1.36E-09,3,1,-3.40641,-0.0842075,0.996446,0.003554,4.97599,3.18809,1.15535,-0.155353,Source: Sandia National Laboratories
";

const CEC_MODULES: &str = "\
Name,Technology,Bifacial,STC,PTC,A_c,Length,Width,N_s,I_sc_ref,V_oc_ref,I_mp_ref,V_mp_ref,alpha_sc,beta_oc,T_NOCT,a_ref,I_L_ref,I_o_ref,R_s,R_sh_ref,Adjust,gamma_r,BIPV,Version,Date
Units,,,W,W,m2,m,m,,A,V,A,V,A/K,V/K,C,V,A,A,Ohm,Ohm,%,%/K,,,
[0],,,,,,,,,,,,,,,,,,,,,,,,,
Example Solar ES-300 (60 cell),Mono-c-Si,0,300.0,275.1,1.7,1.65,1.0,60,9.8,39.5,9.3,32.3,0.0049,-0.118,45.0,1.6,9.81,1.5e-10,0.31,300.0,8.0,-0.39,N,SAM 2018.11.11 r2,1/3/2019
";

const INVERTERS: &str = "\
Name,Vac,Pso,Paco,Pdco,Vdco,C0,C1,C2,C3,Pnt,Vdcmax,Idcmax,Mppt_low,Mppt_high,CEC_Date,CEC_Type
Units,V,W,W,W,V,1/W,1/V,1/V,1/V,W,V,A,V,V,,
[0],,,,,,,,,,,,,,,,
ABB: MICRO-0.25-I-OUTD-US-208 [208V],208,2.089607,250,259.588593,40,-4.1e-05,-9.1e-05,0.000494,-0.013171,0.075,50,6.489715,30,50,,Utility Interactive
";

/// A year in which the sun shines from 9 to 15 every day
fn write_weather(dir: &Path) -> PathBuf {
    let mut s = TRY_HEADER.to_string();
    for i in 0..8760 {
        let hour = i % 24 + 1;
        let (b, d) = if (9..=15).contains(&hour) {
            (300, 100)
        } else {
            (0, 0)
        };
        s.push_str(&format!(
            "3936500 2449500  1  1 {:2}   5.0  985 220  3.1 5  4.8  80 {:4} {:4} 300  350  0\n",
            hour, b, d
        ));
    }
    let path = dir.join("TRY2015_test_Jahr.dat");
    std::fs::write(&path, s).unwrap();
    path
}

struct Fixture {
    dir: TempDir,
    weather: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let weather = write_weather(dir.path());
        std::fs::write(dir.path().join("Sandia_Modules.csv"), SANDIA_MODULES).unwrap();
        std::fs::write(dir.path().join("CEC_Modules.csv"), CEC_MODULES).unwrap();
        std::fs::write(dir.path().join("CEC_Inverters.csv"), INVERTERS).unwrap();
        Self { dir, weather }
    }

    fn request(&self, plants: &[&str]) -> SimulationRequest {
        SimulationRequest {
            uuid: "test".to_string(),
            keep_files: false,
            output_directory: self.dir.path().join("tmp"),
            weather_data: WeatherSource::File(WeatherFile {
                file: self.weather.clone(),
                adjust_timestamp: None,
                recalculate_dni: None,
                timeshift_in_minutes: None,
            }),
            photovoltaic_plants: plants.iter().map(|p| plant(p)).collect(),
            databases: ComponentDatabasePaths::in_directory(self.dir.path()),
        }
    }
}

/// A plant with a Sandia module and the microinverter; `extra` is
/// appended to its description
fn plant(extra: &str) -> PlantSpec {
    json5::from_str(&format!(
        "{{
            uid: 'plant',
            surfaceAzimuth: 180,
            surfaceTilt: 30,
            modulesPerString: 1,
            stringsPerInverter: 1,
            numberOfInverters: 4,
            moduleName: 'Canadian Solar CS5P-220M [ 2009]',
            inverterName: 'ABB__MICRO_0_25_I_OUTD_US_208__208V_',
            {}
        }}",
        extra
    ))
    .unwrap()
}

/// Produces as much DC power as there is GHI, and consumes a bit at night.
/// Fails on very steep plants.
struct MockEngine;

impl PhysicsEngine for MockEngine {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn dc_output(
        &self,
        system: &PvSystem,
        environment: &EnvironmentalSeries,
    ) -> Result<DcOutput, PhysicsEngineError> {
        if system.surface_tilt > 80. {
            return Err(PhysicsEngineError::InvalidParameter {
                field: "surfaceTilt",
                value: system.surface_tilt,
            });
        }
        Ok(DcOutput {
            p_mp: environment
                .ghi
                .iter()
                .map(|g| if *g > 0. { *g } else { -5. })
                .collect(),
            v_mp: vec![30.; environment.len()],
        })
    }
}

#[test]
fn identical_plants() {
    let fixture = Fixture::new();
    let logger = RecordingLogger::new();

    let mut single = fixture.request(&[""]);
    let single = run(&mut single, &MockEngine, &logger).unwrap();

    let mut fleet = fixture.request(&["", "", ""]);
    let results = run(&mut fleet, &MockEngine, &logger).unwrap();
    let plant = &single.plants()[0];
    let summary = results.summary();

    assert_eq!(results.plants().len(), 3);
    assert_relative_eq!(
        summary.sum_of_energy_per_year,
        3. * plant.sum_of_energy_per_year,
        max_relative = 1e-9
    );
    assert_relative_eq!(
        summary.work_specific_energy_per_year,
        plant.work_specific_energy_per_year,
        max_relative = 1e-9
    );
    assert_relative_eq!(
        summary.area_specific_energy_per_year,
        plant.area_specific_energy_per_year,
        max_relative = 1e-9
    );
    for (a, b) in summary
        .energy_area_profile
        .iter()
        .zip(plant.energy_area_profile.iter())
    {
        assert_relative_eq!(*a, *b, max_relative = 1e-9);
    }

    // 4 modules of 1.701 m2 and 4.54629 A x 48.3156 V
    let stored = fleet.photovoltaic_plants[0].results().unwrap();
    assert_relative_eq!(stored.surface_area, 4. * 1.701, max_relative = 1e-9);
    assert_relative_eq!(
        stored.rated_power,
        4. * 4.54629 * 48.3156 / 1000.,
        max_relative = 1e-9
    );
}

#[test]
fn energy_from_power() {
    let fixture = Fixture::new();
    let mut request = fixture.request(&["inverterEta: 0.5, lossesIrradiation: 0"]);
    let results = run(&mut request, &MockEngine, &RecordingLogger::new()).unwrap();

    // 400 W/m2 for 7 hours a day; half of it reaches the grid, 4 inverters
    let expected = 400. * 0.5 * 4. * 7. * 365. / 1000.;
    assert_relative_eq!(
        results.plants()[0].sum_of_energy_per_year,
        expected,
        max_relative = 1e-9
    );
}

#[test]
fn preparation_order() {
    let fixture = Fixture::new();

    let mut documented = pvyield::read_weather_file(&fixture.weather).unwrap();
    let mut reversed = documented.clone();
    assert!(documented.adjust_timestamp && documented.recalculate_dni);

    documented.prepare();

    reversed.recalculate_dni();
    reversed.adjust_timestamp();

    // Same timestamps, different sun
    assert_eq!(documented.records[0].timestamp, reversed.records[0].timestamp);
    let dni = |d: &pvyield::WeatherDataset| d.column(|r| r.dni);
    assert_ne!(dni(&documented), dni(&reversed));

    // This is the order used when simulating
    let mut manual = pvyield::read_weather_file(&fixture.weather).unwrap();
    manual.adjust_timestamp();
    manual.recalculate_dni();
    assert_eq!(dni(&documented), dni(&manual));
    assert!(dni(&documented).iter().all(|v| v.is_finite() && *v >= 0.));
}

#[test]
fn warning_without_adjustment() {
    let fixture = Fixture::new();
    let logger = RecordingLogger::new();

    let mut request = fixture.request(&[""]);
    if let WeatherSource::File(f) = &mut request.weather_data {
        f.adjust_timestamp = Some(false);
    }
    run(&mut request, &MockEngine, &logger).unwrap();
    let warnings = logger.with_level(Level::Warning);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("DNI"));

    // No warning in the usual case
    let logger = RecordingLogger::new();
    run(&mut fixture.request(&[""]), &MockEngine, &logger).unwrap();
    assert!(logger.with_level(Level::Warning).is_empty());
    assert!(logger
        .with_level(Level::Info)
        .iter()
        .any(|m| m.contains("finished")));
}

#[test]
fn unknown_database_type() {
    let fixture = Fixture::new();
    let mut request = fixture.request(&["", "modulesDatabaseType: 7"]);
    let err = run(&mut request, &MockEngine, &RecordingLogger::new()).unwrap_err();
    assert_eq!(err.plant_index(), Some(1));
    assert!(matches!(
        err,
        SimulationError::Configuration {
            index: 1,
            source: ConfigurationError::UnknownDatabaseType(7)
        }
    ));
    assert!(err.to_string().contains('7'));
}

#[test]
fn unknown_module() {
    let fixture = Fixture::new();
    let mut request = fixture.request(&["moduleName: 'Not a module'"]);
    let err = run(&mut request, &MockEngine, &RecordingLogger::new()).unwrap_err();
    assert!(matches!(
        err,
        SimulationError::Configuration {
            index: 0,
            source: ConfigurationError::UnknownModule { .. }
        }
    ));
}

#[test]
fn physics_engine_failure() {
    let fixture = Fixture::new();
    let mut request = fixture.request(&["", "", "surfaceTilt: 85", ""]);
    let err = run(&mut request, &MockEngine, &RecordingLogger::new()).unwrap_err();
    assert!(matches!(
        err,
        SimulationError::PhysicsEngine { index: 2, .. }
    ));
}

#[test]
fn stand_by_power() {
    let fixture = Fixture::new();
    let mut request = fixture.request(&[
        "useInverterDatabase: true",
        "useInverterDatabase: true, useStandByPowerInverter: true",
    ]);
    let results = run(&mut request, &MockEngine, &RecordingLogger::new()).unwrap();

    let clipped = &results.plants()[0].energy_profile;
    let kept = &results.plants()[1].energy_profile;
    assert!(clipped.iter().all(|e| *e >= 0.));
    // 4 inverters consuming 0.075 W each at night
    let night = kept[0];
    assert_relative_eq!(night, -4. * 0.075 / 1000., max_relative = 1e-9);
    assert!(kept.iter().zip(clipped.iter()).all(|(k, c)| k <= c));
}

/// Has no idea how much power the modules produce
struct MissingPowerEngine;

impl PhysicsEngine for MissingPowerEngine {
    fn name(&self) -> &'static str {
        "missing power"
    }

    fn dc_output(
        &self,
        _system: &PvSystem,
        environment: &EnvironmentalSeries,
    ) -> Result<DcOutput, PhysicsEngineError> {
        Ok(DcOutput {
            p_mp: vec![Float::NAN; environment.len()],
            v_mp: vec![30.; environment.len()],
        })
    }
}

#[test]
fn missing_power_produces_nothing() {
    let fixture = Fixture::new();
    let mut request = fixture.request(&[
        "useInverterDatabase: true",
        "useInverterDatabase: true, useStandByPowerInverter: true",
        "",
    ]);
    let results = run(&mut request, &MissingPowerEngine, &RecordingLogger::new()).unwrap();

    for plant in results.plants() {
        assert_eq!(plant.sum_of_energy_per_year, 0.0);
        assert!(plant.energy_profile.iter().all(|e| *e == 0.0));
    }
    assert_eq!(results.summary().sum_of_energy_per_year, 0.0);
}

#[test]
fn model_chain_end_to_end() {
    let fixture = Fixture::new();
    let mut request = fixture.request(&[
        "",
        "moduleName: 'Example Solar ES-300 (60 cell)', modulesDatabaseType: 2, useInverterDatabase: true",
    ]);
    let results = run(&mut request, &ModelChain::default(), &RecordingLogger::new()).unwrap();

    for p in results.plants() {
        assert_eq!(p.energy_profile.len(), 8760);
        assert!(p.energy_profile.iter().all(|e| e.is_finite() && *e >= 0.));
        let yield_kwp: Float = p.work_specific_energy_per_year;
        assert!(yield_kwp > 200. && yield_kwp < 3000., "{}", yield_kwp);
    }
}

#[test]
fn json_document() {
    let fixture = Fixture::new();
    let mut request = fixture.request(&["", "surfaceAzimuth: 90"]);
    let results = run(&mut request, &MockEngine, &RecordingLogger::new()).unwrap();

    let json = results.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let plants = value["PhotovoltaicResults"]["PhotovoltaicPlants"]
        .as_array()
        .unwrap();
    assert_eq!(plants.len(), 2);
    assert_eq!(
        plants[0]["EnergyProfile"].as_array().unwrap().len(),
        8760
    );
    assert!(value["PhotovoltaicResults"]["SummaryOfAllPlants"]["SumOfEnergyPerYear"].is_number());

    let back: SimulationResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, results);
}

#[test]
fn keep_files() {
    let fixture = Fixture::new();
    let mut request = fixture.request(&["", ""]);
    request.keep_files = true;
    run(&mut request, &MockEngine, &RecordingLogger::new()).unwrap();

    let out = fixture.dir.path().join("tmp");
    let profiles = std::fs::read_to_string(out.join("test_energy_profiles.csv")).unwrap();
    assert_eq!(profiles.lines().count(), 8761);
    let summary = std::fs::read_to_string(out.join("test_summary.csv")).unwrap();
    assert!(summary.starts_with("Value,Plant 0,Plant 1,All plants"));
}

#[test]
fn request_file() {
    let fixture = Fixture::new();
    let request = fixture.request(&[""]);
    let path = fixture.dir.path().join("request.json");
    std::fs::write(&path, serde_json::to_string(&request).unwrap()).unwrap();

    let results = pvyield::run_simulation::run_file(&path, &MockEngine, &RecordingLogger::new())
        .unwrap();
    assert_eq!(results.plants().len(), 1);
}
