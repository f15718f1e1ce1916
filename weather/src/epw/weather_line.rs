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
use crate::record::WeatherRecord;
use crate::Float;

use calendar::chrono::{Duration, FixedOffset};
use calendar::Period;
use serde::{Deserialize, Serialize};

/// The information we use from an EPW Weather line
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EPWWeatherLine {
    /// Element N1 in the EPW dictionary
    pub year: i32,

    /// Element N2 in the EPW dictionary
    pub month: u8,

    /// Element N3 in the EPW dictionary
    pub day: u8,

    /// Element N4 in the EPW dictionary (from 1 to 24)
    pub hour: u8,

    /// Element N5 in the EPW dictionary
    pub minute: u8,

    /// Element N6 in the EPW dictionary
    /// in degrees C
    pub dry_bulb_temperature: Float,

    /// Element N8 in the EPW dictionary
    /// in % (from 1 to 100)
    pub relative_humidity: Float,

    /// Element N9 in the EPW dictionary
    /// in Pa
    pub atmospheric_station_pressure: Float,

    /// Element N13 in the EPW dictionary
    /// in Wh/m2
    pub global_horizontal_radiation: Float,

    /// Element N14 in the EPW dictionary
    /// in Wh/m2
    pub direct_normal_radiation: Float,

    /// Element N15 in the EPW dictionary
    /// in Wh/m2
    pub diffuse_horizontal_radiation: Float,

    /// Element N20 in the EPW dictionary
    /// in degrees. Missing values (999) become `None`
    pub wind_direction: Option<Float>,

    /// Element N21 in the EPW dictionary
    /// in m/s
    pub wind_speed: Float,

    /// Element N22 in the EPW dictionary
    /// (Goes from 0 to 10)
    pub total_sky_cover: Float,

    /// Element N28 in the EPW dictionary
    /// in mm
    pub precipitable_water: Float,
}

impl EPWWeatherLine {
    /// Builds a [`WeatherRecord`], placing this line within `year`.
    ///
    /// EPW files count hours from 1 to 24, where hour 1 holds the
    /// data from 00:00 to 01:00. The timestamp is placed at the
    /// beginning of that interval. Returns `None` if the date does not exist
    /// (e.g., February 29th on a non-leap year).
    pub fn to_record(&self, year: i32, offset: FixedOffset) -> Option<WeatherRecord> {
        let midnight = Period::local_midnight(year, self.month as u32, self.day as u32, offset)?;
        let timestamp = midnight + Duration::hours(self.hour as i64 - 1);

        Some(WeatherRecord {
            timestamp,
            temp_air: self.dry_bulb_temperature,
            relative_humidity: self.relative_humidity,
            wind_speed: self.wind_speed,
            atmospheric_pressure: self.atmospheric_station_pressure,
            ghi: self.global_horizontal_radiation,
            dhi: self.diffuse_horizontal_radiation,
            dni: self.direct_normal_radiation,
            wind_direction: self.wind_direction,
            sky_cover: Some(self.total_sky_cover),
            precipitable_water: Some(self.precipitable_water),
        })
    }
}
