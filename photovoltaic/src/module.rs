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
use crate::database::{ComponentRecord, DatabaseType};
use crate::error::ConfigurationError;
use crate::Float;

/// Temperature at Standard Test Conditions, in C
pub const STC_TEMPERATURE: Float = 25.;

/// Irradiance at Standard Test Conditions, in W/m2
pub const STC_IRRADIANCE: Float = 1000.;

const BOLTZMANN: Float = 1.38066e-23;
const ELEMENTARY_CHARGE: Float = 1.60218e-19;

/// Parameters of the Sandia Array Performance Model (King et al., 2004)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SandiaModule {
    /// Module area (m2)
    pub area: Float,
    /// Current at the maximum power point (A)
    pub impo: Float,
    /// Voltage at the maximum power point (V)
    pub vmpo: Float,
    /// Temperature coefficient of `impo` (1/C)
    pub aimp: Float,
    /// Temperature coefficient of `vmpo` (V/C)
    pub bvmpo: Float,
    /// Irradiance dependence of `bvmpo` (V/C)
    pub mbvmp: Float,
    /// Diode factor
    pub n: Float,
    /// Number of cells in series
    pub cells_in_series: Float,
    /// Coefficients relating current and voltage to irradiance
    pub c: [Float; 4],
    /// Spectral (air mass) polynomial
    pub a: [Float; 5],
}

/// The subset of the CEC parameters used by the PVWatts-like
/// performance model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CecModule {
    /// Module area (m2)
    pub a_c: Float,
    /// Current at the maximum power point (A)
    pub i_mp_ref: Float,
    /// Voltage at the maximum power point (V)
    pub v_mp_ref: Float,
    /// Power temperature coefficient (%/C)
    pub gamma_r: Float,
    /// Open-circuit voltage temperature coefficient (V/C)
    pub beta_oc: Float,
}

/// The electrical description of a module
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModuleParameters {
    /// A module in the Sandia catalogue
    Sandia(SandiaModule),
    /// A module in the CEC catalogue
    Cec(CecModule),
}

impl ModuleParameters {
    /// Reads the parameters from a catalogue row. The fields that are
    /// read depend on the catalogue.
    pub fn from_record(
        database: DatabaseType,
        record: &ComponentRecord,
    ) -> Result<Self, ConfigurationError> {
        let ret = match database {
            DatabaseType::Sandia => Self::Sandia(SandiaModule {
                area: record.require("Area")?,
                impo: record.require("Impo")?,
                vmpo: record.require("Vmpo")?,
                aimp: record.require("Aimp")?,
                bvmpo: record.require("Bvmpo")?,
                mbvmp: record.require("Mbvmp")?,
                n: record.require("N")?,
                cells_in_series: record.require("Cells_in_Series")?,
                c: [
                    record.require("C0")?,
                    record.require("C1")?,
                    record.require("C2")?,
                    record.require("C3")?,
                ],
                a: [
                    record.require("A0")?,
                    record.require("A1")?,
                    record.require("A2")?,
                    record.require("A3")?,
                    record.require("A4")?,
                ],
            }),
            DatabaseType::Cec => Self::Cec(CecModule {
                a_c: record.require("A_c")?,
                i_mp_ref: record.require("I_mp_ref")?,
                v_mp_ref: record.require("V_mp_ref")?,
                gamma_r: record.require("gamma_r")?,
                beta_oc: record.require("beta_oc")?,
            }),
        };
        Ok(ret)
    }

    /// Current and voltage at the maximum power point, at
    /// Standard Test Conditions
    pub fn reference_mpp(&self) -> (Float, Float) {
        match self {
            Self::Sandia(m) => (m.impo, m.vmpo),
            Self::Cec(m) => (m.i_mp_ref, m.v_mp_ref),
        }
    }

    /// Rated (peak) power of a single module, in W
    pub fn rated_power(&self) -> Float {
        let (i, v) = self.reference_mpp();
        i * v
    }

    /// Area of a single module, in m2
    pub fn area(&self) -> Float {
        match self {
            Self::Sandia(m) => m.area,
            Self::Cec(m) => m.a_c,
        }
    }

    /// Spectral correction for a certain absolute air mass. Only Sandia
    /// modules carry spectral coefficients; other modules return 1.
    pub fn spectral_factor(&self, absolute_air_mass: Float) -> Float {
        match self {
            Self::Sandia(m) => {
                if !absolute_air_mass.is_finite() {
                    return 0.0;
                }
                let am = absolute_air_mass;
                let f1 = m.a[0] + m.a[1] * am + m.a[2] * am.powi(2) + m.a[3] * am.powi(3)
                    + m.a[4] * am.powi(4);
                f1.max(0.0)
            }
            Self::Cec(_) => 1.0,
        }
    }

    /// Current (A) and voltage (V) at the maximum power point of a single module.
    ///
    /// `effective_irradiance` is the irradiance reaching the cells (W/m2),
    /// after incidence angle and spectral losses, and `cell_temperature`
    /// is in C. Returns zeroes when there is no light.
    pub fn max_power_point(&self, effective_irradiance: Float, cell_temperature: Float) -> (Float, Float) {
        let ee = effective_irradiance / STC_IRRADIANCE;
        if ee.is_nan() || ee <= 0.0 {
            return (0.0, 0.0);
        }
        let dt = cell_temperature - STC_TEMPERATURE;

        let (i, v) = match self {
            Self::Sandia(m) => {
                let delta = m.n * BOLTZMANN * (cell_temperature + 273.15) / ELEMENTARY_CHARGE;
                let log_ee = ee.ln();
                let bvmp = m.bvmpo + m.mbvmp * (1. - ee);

                let i = m.impo * (m.c[0] * ee + m.c[1] * ee * ee) * (1. + m.aimp * dt);
                let v = m.vmpo
                    + m.c[2] * m.cells_in_series * delta * log_ee
                    + m.c[3] * m.cells_in_series * (delta * log_ee).powi(2)
                    + bvmp * dt;
                (i, v)
            }
            Self::Cec(m) => {
                // Power follows irradiance and the temperature coefficient,
                // the voltage only follows temperature.
                let p = m.i_mp_ref * m.v_mp_ref * ee * (1. + m.gamma_r / 100. * dt);
                let v = m.v_mp_ref + m.beta_oc * dt;
                if v > 0.0 {
                    (p / v, v)
                } else {
                    (0.0, 0.0)
                }
            }
        };
        (i.max(0.0), v.max(0.0))
    }
}
