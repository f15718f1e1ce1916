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
use crate::solar::{Solar, SunPosition};
use crate::Float;
use calendar::{Date, Timestamp};
use calendar::chrono::FixedOffset;
use serde::{Deserialize, Serialize};

/// A Location
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// The name of the City
    #[serde(default)]
    pub city: String,

    /// The name or ISO code of the country
    #[serde(default)]
    pub country: String,

    /// The Latitude in Degrees.
    ///
    /// South is negative, North is Positive.
    pub latitude: Float,

    /// The Longitude in Degrees.
    ///
    /// West is Negative, East is Positive
    pub longitude: Float,

    /// The UTC offset of the (standard) time used in the weather
    /// data, in hours. East is positive.
    pub utc_offset: Float,

    /// The elevation above sea level, in meters
    pub altitude: Float,
}

impl Location {
    /// The position of the sun at a certain time. The standard meridian
    /// is the one of the offset the timestamp is tagged with, which
    /// may differ from [`Location::utc_offset`].
    pub fn sun_position(&self, timestamp: &Timestamp) -> SunPosition {
        let utc_offset = timestamp.offset().local_minus_utc() as Float / 3600.;
        let solar = Solar::new(
            self.latitude.to_radians(),
            -self.longitude.to_radians(),
            -(utc_offset * 15.).to_radians(),
        );
        solar.sun_position_from_standard_time(Date::from(*timestamp))
    }

    /// The UTC offset as a `chrono` offset. Returns `None` if it
    /// is out of bounds (i.e., more than a day).
    pub fn fixed_offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt((self.utc_offset * 3600.).round() as i32)
    }
}
