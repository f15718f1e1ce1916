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
use crate::{Float, PI};
use calendar::Date;

/// Sun position calculator for a specific location.
///
/// The distinction between Solar and Standard time is made
/// through the [`Time`] enum, so that we don't mistake one for the other.
#[derive(Clone, Copy, Debug)]
pub struct Solar {
    /// Latitude in Radians. South is negative, North is positive.
    latitude: Float,

    /// Longitude (in Radians). East is negative, West is positive
    ///
    /// > Note that this is the opposite of weather files.
    longitude: Float,

    /// Standard meridian (in Radians). East is negative, West is positive.
    ///
    /// This value is essentially (in degrees) `-15.0*TimeZone` (e.g., GMT+1 becomes -15.0)
    ///
    ///  > Note that this is the opposite of weather files.
    standard_meridian: Float,
}

/// Solar or Standard time, containing the day of the year 'n'
#[derive(Debug, Clone, Copy)]
pub enum Time {
    /// Time is in Solar time
    Solar(Float),

    /// Time is in Standard time
    Standard(Float),
}

impl std::default::Default for Time {
    fn default() -> Self {
        Self::Standard(0.0)
    }
}

/// The position of the sun in the sky, as seen from a [`Solar`] location
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    /// Zenith angle, in Radians. Larger than `PI/2` when the
    /// sun is below the horizon.
    pub zenith: Float,

    /// Solar azimuth angle (Radians), measured from the South.
    /// East of South is negative and West of South is positive
    /// (Figure 1.6.1 of Duffie and Beckman).
    pub azimuth: Float,
}

impl SunPosition {
    /// Is the sun above the horizon?
    pub fn is_up(&self) -> bool {
        self.zenith < PI / 2.
    }
}

impl Solar {
    /// Builds a Solar object from  a Latitude,
    /// Longitude and Standard meridian (in Radians)
    pub fn new(latitude: Float, longitude: Float, standard_meridian: Float) -> Self {
        Self {
            latitude,
            longitude,
            standard_meridian,
        }
    }

    /// Returns the difference between the solar and the standard time in minutes
    pub fn solar_standard_time_difference(&self, n: Float) -> Float {
        4.0 * (self.standard_meridian - self.longitude).to_degrees() + self.equation_of_time(n)
    }

    /// Returns the content of a Time enum. Transforms to Solar
    /// if the type of the Enum is Standard
    pub fn unwrap_solar_time(&self, n: Time) -> Float {
        match n {
            Time::Solar(t) => t,
            Time::Standard(t) => {
                let delta_minutes = self.solar_standard_time_difference(t);
                // return the standard time + the number of minutes divided
                // the number of minutes in a day
                t + delta_minutes / 24. / 60.
            }
        }
    }

    /// The Equation of Time based on the day of year (can have decimals)
    ///
    /// n should be in solar time, but this variable does not change daily so
    /// it probably does not matter... let's just treat it as Float
    pub fn equation_of_time(&self, n: Float) -> Float {
        let b = self.b(n);
        229.2
            * (0.000075 + 0.001868 * b.cos()
                - 0.032077 * b.sin()
                - 0.014615 * (2.0 * b).cos()
                - 0.04089 * (2.0 * b).sin())
    }

    /// Declination (in Radians), according to Equation 1.6.1B
    ///
    /// n should be in solar time, but this variable does not change daily so
    /// it probably does not matter... let's just treat it as Float
    pub fn declination(&self, n: Float) -> Float {
        let b = self.b(n);

        // Return in Radians
        0.006918 - 0.399912 * b.cos() + 0.070257 * b.sin() - 0.006758 * (2. * b).cos()
            + 0.000907 * (2. * b).sin()
            - 0.002697 * (3. * b).cos()
            + 0.001480 * (3. * b).sin()
    }

    /// Equation 1.4.2 in the Book.
    #[inline(always)]
    fn b(&self, n: Float) -> Float {
        (n - 1.0) * 2.0 * PI / 365.0
    }

    /// Returns the hour angle in Radians
    pub fn hour_angle(&self, n: Time) -> Float {
        let n = self.unwrap_solar_time(n);

        // Remove the day (keep the hour). Multiply by 24 hours
        let solar_hour = 24. * n.rem_euclid(1.);

        // Multiply for 24 hours, and by 15degrees/hour
        ((solar_hour - 12.) * 15.).to_radians()
    }

    /// Calculates the sun position based on a date, assumed to be in Standard Time
    pub fn sun_position_from_standard_time(&self, date: Date) -> SunPosition {
        let n = Time::Standard(date.day_of_year());
        self.sun_position(n)
    }

    /// Calculates the zenith and azimuth of the sun. Unlike a sky model, this
    /// does not stop at the horizon: night-time positions have a zenith
    /// larger than 90 degrees.
    pub fn sun_position(&self, n: Time) -> SunPosition {
        let n = self.unwrap_solar_time(n);

        let cos_phi = self.latitude.cos();
        let sin_phi = self.latitude.sin();

        let delta = self.declination(n);
        let cos_delta = delta.cos();
        let sin_delta = delta.sin();

        let omega = self.hour_angle(Time::Solar(n));
        let cos_omega = omega.cos();

        // Equation 1.6.5, for Zenith
        let cos_zenith = (cos_phi * cos_delta * cos_omega + sin_phi * sin_delta).clamp(-1., 1.);
        let zenith = cos_zenith.acos();
        let sin_zenith = zenith.sin();

        // Sun right above us.
        if sin_zenith.abs() < 1e-6 || cos_phi.abs() < 1e-6 {
            return SunPosition {
                zenith,
                azimuth: 0.0,
            };
        }

        // Equation 1.6.6 for Azimuth
        let cos_azimuth =
            ((cos_zenith * sin_phi - sin_delta) / (sin_zenith * cos_phi)).clamp(-1., 1.);
        let azimuth = cos_azimuth.acos();

        SunPosition {
            zenith,
            azimuth: if omega < 0. { -azimuth } else { azimuth },
        }
    }
}
