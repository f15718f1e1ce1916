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

/// Standard atmospheric pressure at sea level, in Pa
pub const SEA_LEVEL_PRESSURE: Float = 101325.;

/// Pressure (Pa) at a certain altitude (m), following the
/// standard atmosphere.
pub fn alt2pres(altitude: Float) -> Float {
    100. * ((44331.514 - altitude) / 11880.516).powf(1. / 0.1902632)
}

/// Estimates the precipitable water (cm) from the air temperature (C)
/// and relative humidity (%), following Gueymard (1994).
///
/// Results are limited to a minimum of 0.1 cm.
///
/// > Gueymard, C. (1994). Analysis of Monthly Average Atmospheric
/// > Precipitable Water and Turbidity in Canada and Northern United States.
/// > Solar Energy 53(1), 57-71.
pub fn gueymard94_pw(temp_air: Float, relative_humidity: Float) -> Float {
    let t = temp_air + 273.15; // Kelvin
    let theta = t / 273.15;

    let pw = 0.1
        * (0.4976 + 1.5265 * theta + (13.6897 * theta - 14.9188 * theta.powi(3)).exp())
        * (216.7 * relative_humidity / (100. * t)
            * (22.330 - 49.140 * (100. / t) - 10.922 * (100. / t).powi(2) - 0.39015 * t / 100.)
                .exp());

    pw.max(0.1)
}

/// Relative (i.e., sea-level) optical air mass, as in Kasten and
/// Young (1989). `zenith` in Radians.
///
/// Returns `NaN` when the sun is below the horizon.
pub fn relative_air_mass(zenith: Float) -> Float {
    let zenith_deg = zenith.to_degrees();
    if zenith_deg >= 90. {
        return Float::NAN;
    }
    1.0 / (zenith.cos() + 0.50572 * (96.07995 - zenith_deg).powf(-1.6364))
}

/// Air mass corrected by the site pressure (Pa)
pub fn absolute_air_mass(relative: Float, pressure: Float) -> Float {
    relative * pressure / SEA_LEVEL_PRESSURE
}
