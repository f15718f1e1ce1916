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
use crate::database::ComponentRecord;
use crate::error::ConfigurationError;
use crate::Float;

/// The Sandia inverter model (King et al., 2007)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SandiaInverter {
    /// Maximum AC power (W)
    pub paco: Float,
    /// DC power at which `paco` is reached (W)
    pub pdco: Float,
    /// DC voltage at which the other parameters were measured (V)
    pub vdco: Float,
    /// DC power needed to start the inversion process (W)
    pub pso: Float,
    /// Curvature of the power relationship (1/W)
    pub c0: Float,
    /// Voltage dependence of `pdco` (1/V)
    pub c1: Float,
    /// Voltage dependence of `pso` (1/V)
    pub c2: Float,
    /// Voltage dependence of `c0` (1/V)
    pub c3: Float,
    /// AC power consumed at night (W)
    pub pnt: Float,
}

impl SandiaInverter {
    /// Reads the parameters from a catalogue row
    pub fn from_record(record: &ComponentRecord) -> Result<Self, ConfigurationError> {
        Ok(Self {
            paco: record.require("Paco")?,
            pdco: record.require("Pdco")?,
            vdco: record.require("Vdco")?,
            pso: record.require("Pso")?,
            c0: record.require("C0")?,
            c1: record.require("C1")?,
            c2: record.require("C2")?,
            c3: record.require("C3")?,
            pnt: record.require("Pnt")?,
        })
    }

    /// AC power (W) delivered for a DC input of `p_dc` (W) at `v_dc` (V).
    ///
    /// The output is limited to `paco`. Below `pso` the inverter does not
    /// operate and consumes `pnt`, so the result is negative. A `NaN`
    /// input gives a `NaN` output.
    pub fn ac_power(&self, v_dc: Float, p_dc: Float) -> Float {
        let dv = v_dc - self.vdco;
        let a = self.pdco * (1. + self.c1 * dv);
        let b = self.pso * (1. + self.c2 * dv);
        let c = self.c0 * (1. + self.c3 * dv);

        if p_dc < self.pso {
            return -self.pnt.abs();
        }
        let ac = (self.paco / (a - b) - c * (a - b)) * (p_dc - b) + c * (p_dc - b).powi(2);
        // Float::min would turn NaN into paco
        if ac > self.paco {
            self.paco
        } else {
            ac
        }
    }
}
