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
use crate::Float;

/// How modules are mounted. This determines how hot they get.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Installation {
    /// Glass/glass modules on an open rack (selector `1`)
    OpenRackGlassGlass,

    /// Glass/polymer modules on an open rack (selector `2`)
    OpenRackGlassPolymer,

    /// Glass/glass modules mounted close to the roof (selector `3`)
    CloseMountGlassGlass,

    /// Glass/polymer modules with an insulated back (selector `4`)
    InsulatedBackGlassPolymer,
}

impl Installation {
    /// Interprets the selector used in plant descriptions
    pub fn from_selector(selector: i64) -> Result<Self, ConfigurationError> {
        match selector {
            1 => Ok(Self::OpenRackGlassGlass),
            2 => Ok(Self::OpenRackGlassPolymer),
            3 => Ok(Self::CloseMountGlassGlass),
            4 => Ok(Self::InsulatedBackGlassPolymer),
            _ => Err(ConfigurationError::UnknownInstallation(selector)),
        }
    }

    /// The thermal model of this kind of installation
    pub fn thermal_model(&self) -> SapmTemperature {
        let (a, b, delta_t) = match self {
            Self::OpenRackGlassGlass => (-3.47, -0.0594, 3.),
            Self::OpenRackGlassPolymer => (-3.56, -0.0750, 3.),
            Self::CloseMountGlassGlass => (-2.98, -0.0471, 1.),
            Self::InsulatedBackGlassPolymer => (-2.81, -0.0455, 0.),
        };
        SapmTemperature { a, b, delta_t }
    }
}

/// The cell temperature model of the Sandia Array Performance Model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SapmTemperature {
    /// Upper limit of the module temperature at low wind speeds
    pub a: Float,
    /// Rate at which the module temperature drops as wind increases
    pub b: Float,
    /// Difference between cell and module back at 1000 W/m2
    pub delta_t: Float,
}

impl SapmTemperature {
    /// Cell temperature (C) given the plane-of-array irradiance (W/m2),
    /// the air temperature (C) and the wind speed (m/s)
    pub fn cell_temperature(&self, poa_global: Float, temp_air: Float, wind_speed: Float) -> Float {
        let module = poa_global * (self.a + self.b * wind_speed).exp() + temp_air;
        module + poa_global / 1000. * self.delta_t
    }
}
