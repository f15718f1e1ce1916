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
use calendar::Timestamp;

/// Data associated to the specific weather conditions at a particular
/// moment. This is one row of a [`crate::WeatherDataset`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherRecord {
    /// The moment this record represents, in the
    /// standard time of the location
    pub timestamp: Timestamp,

    /// Dry bulb temperature, in C
    pub temp_air: Float,

    /// Relative humidity, in % (from 0 to 100)
    pub relative_humidity: Float,

    /// Wind speed, in m/s
    pub wind_speed: Float,

    /// Atmospheric pressure, in Pa
    pub atmospheric_pressure: Float,

    /// Global horizontal irradiance, in W/m2
    pub ghi: Float,

    /// Diffuse horizontal irradiance, in W/m2
    pub dhi: Float,

    /// Direct normal irradiance, in W/m2
    pub dni: Float,

    /// Wind direction, in degrees
    pub wind_direction: Option<Float>,

    /// Sky cover, in octas or tenths depending on the source
    pub sky_cover: Option<Float>,

    /// Precipitable water (or humidity ratio, for some sources)
    pub precipitable_water: Option<Float>,
}

impl WeatherRecord {
    /// Creates a record with no wind, radiation or auxiliary data.
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            temp_air: 0.,
            relative_humidity: 0.,
            wind_speed: 0.,
            atmospheric_pressure: crate::atmosphere::SEA_LEVEL_PRESSURE,
            ghi: 0.,
            dhi: 0.,
            dni: 0.,
            wind_direction: None,
            sky_cover: None,
            precipitable_water: None,
        }
    }
}
