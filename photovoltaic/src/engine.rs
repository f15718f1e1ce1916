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
use crate::error::PhysicsEngineError;
use crate::module::ModuleParameters;
use crate::temperature::SapmTemperature;
use crate::Float;
use weather::{Location, Timestamp};

/// DC losses, in %
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Losses {
    /// Ohmic losses in the DC cabling, as a percentage of
    /// the power at Standard Test Conditions
    pub dc_ohmic_percent: Float,

    /// Mismatch (and other datasheet) losses, applied to
    /// the DC power
    pub mismatch_percent: Float,
}

/// The part of a plant that is connected to a single inverter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PvSystem {
    /// Tilt of the modules from the horizontal, in degrees
    pub surface_tilt: Float,

    /// Orientation of the modules, in degrees clockwise from
    /// North (i.e., 180 faces South)
    pub surface_azimuth: Float,

    /// Modules in each string
    pub modules_per_string: Float,

    /// Strings connected to the inverter
    pub strings_per_inverter: u32,

    /// The modules
    pub module: ModuleParameters,

    /// How hot the modules get
    pub thermal_model: SapmTemperature,

    /// DC losses
    pub losses: Losses,
}

impl PvSystem {
    /// Number of modules connected to the inverter
    pub fn modules(&self) -> Float {
        self.modules_per_string * self.strings_per_inverter as Float
    }

    /// Checks that the parameters make physical sense
    pub fn validate(&self) -> Result<(), PhysicsEngineError> {
        let check = |field: &'static str, value: Float, ok: bool| {
            if ok && value.is_finite() {
                Ok(())
            } else {
                Err(PhysicsEngineError::InvalidParameter { field, value })
            }
        };
        check(
            "surfaceTilt",
            self.surface_tilt,
            (0. ..=180.).contains(&self.surface_tilt),
        )?;
        check("surfaceAzimuth", self.surface_azimuth, true)?;
        check(
            "modulesPerString",
            self.modules_per_string,
            self.modules_per_string > 0.,
        )?;
        check(
            "stringsPerInverter",
            self.strings_per_inverter as Float,
            self.strings_per_inverter > 0,
        )?;
        check(
            "lossesDCCables",
            self.losses.dc_ohmic_percent,
            (0. ..100.).contains(&self.losses.dc_ohmic_percent),
        )?;
        check(
            "lossesDCDatasheet",
            self.losses.mismatch_percent,
            (0. ..=100.).contains(&self.losses.mismatch_percent),
        )?;
        Ok(())
    }
}

/// The weather as seen by a plant: one value per timestamp
#[derive(Debug, Clone, Default)]
pub struct EnvironmentalSeries {
    /// Where the plant is
    pub location: Location,
    /// When
    pub timestamps: Vec<Timestamp>,
    /// Global horizontal irradiance (W/m2)
    pub ghi: Vec<Float>,
    /// Direct normal irradiance (W/m2)
    pub dni: Vec<Float>,
    /// Diffuse horizontal irradiance (W/m2)
    pub dhi: Vec<Float>,
    /// Air temperature (C)
    pub temp_air: Vec<Float>,
    /// Wind speed (m/s)
    pub wind_speed: Vec<Float>,
    /// Precipitable water (cm)
    pub precipitable_water: Vec<Float>,
    /// Ground reflectance
    pub albedo: Vec<Float>,
    /// Atmospheric pressure (Pa)
    pub pressure: Vec<Float>,
}

impl EnvironmentalSeries {
    /// Number of timesteps
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Are there no timesteps?
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Checks that every series has one value per timestamp
    pub fn check(&self) -> Result<(), PhysicsEngineError> {
        let expected = self.len();
        let series: [(&'static str, &Vec<Float>); 8] = [
            ("ghi", &self.ghi),
            ("dni", &self.dni),
            ("dhi", &self.dhi),
            ("temp_air", &self.temp_air),
            ("wind_speed", &self.wind_speed),
            ("precipitable_water", &self.precipitable_water),
            ("albedo", &self.albedo),
            ("pressure", &self.pressure),
        ];
        for (name, values) in series {
            if values.len() != expected {
                return Err(PhysicsEngineError::SeriesLength {
                    series: name,
                    expected,
                    found: values.len(),
                });
            }
        }
        Ok(())
    }
}

/// The DC output of a [`PvSystem`] (i.e., one inverter's worth of modules)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DcOutput {
    /// Power at the maximum power point (W)
    pub p_mp: Vec<Float>,
    /// Voltage at the maximum power point (V)
    pub v_mp: Vec<Float>,
}

/// Anything that can turn the weather into DC power.
///
/// Engines are shared among plants that are simulated at the same
/// time, so they must be `Sync`.
pub trait PhysicsEngine: Sync {
    /// A name used when reporting
    fn name(&self) -> &'static str;

    /// Calculates the DC output of `system` for every timestep of `environment`.
    ///
    /// Values that cannot be calculated may be `NaN`; callers treat
    /// them as no production.
    fn dc_output(
        &self,
        system: &PvSystem,
        environment: &EnvironmentalSeries,
    ) -> Result<DcOutput, PhysicsEngineError>;
}
