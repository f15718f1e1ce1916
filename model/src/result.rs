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
use crate::Float;

/// What a plant produced over a year. The specific yields are
/// derived from the stored profile every time they are requested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlantResult {
    /// Energy produced in every hour (kWh)
    pub energy_profile: Vec<Float>,

    /// Total area of the modules (m2)
    pub surface_area: Float,

    /// Total rated power of the modules (kWp)
    pub rated_power: Float,
}

impl PlantResult {
    /// Creates a new result
    pub fn new(energy_profile: Vec<Float>, surface_area: Float, rated_power: Float) -> Self {
        Self {
            energy_profile,
            surface_area,
            rated_power,
        }
    }

    /// Energy produced over the whole year (kWh)
    pub fn annual_energy(&self) -> Float {
        self.energy_profile.iter().sum()
    }

    /// Energy produced in every hour, per unit of module
    /// area (kWh/m2). Empty if the plant has no area.
    pub fn area_profile(&self) -> Vec<Float> {
        if self.surface_area <= 0. {
            return Vec::new();
        }
        self.energy_profile
            .iter()
            .map(|e| e / self.surface_area)
            .collect()
    }

    /// Annual energy per installed kWp (kWh/kWp). Zero
    /// if nothing is installed.
    pub fn work_specific_yield(&self) -> Float {
        if self.rated_power <= 0. {
            return 0.;
        }
        self.annual_energy() / self.rated_power
    }

    /// Annual energy per unit of module area (kWh/m2). Zero
    /// if the plant has no area.
    pub fn area_specific_yield(&self) -> Float {
        if self.surface_area <= 0. {
            return 0.;
        }
        self.annual_energy() / self.surface_area
    }
}
