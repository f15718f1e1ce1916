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

/// Zenith angle (degrees) above which a non-zero DNI is not believed
const ZENITH_THRESHOLD_FOR_ZERO_DNI: Float = 88.0;

/// Determines the direct normal irradiance from the global and
/// diffuse horizontal ones. `zenith` is in Radians.
///
/// Returns `NaN` when the result is negative, or when it is
/// not zero but the sun is too low to trust it.
pub fn dni(ghi: Float, dhi: Float, zenith: Float) -> Float {
    let ret = (ghi - dhi) / zenith.cos();

    if ret < 0. {
        return Float::NAN;
    }
    if zenith.to_degrees() >= ZENITH_THRESHOLD_FOR_ZERO_DNI && ret != 0. {
        return Float::NAN;
    }
    ret
}

/// Replaces `NaN` and negative zeroes by `0.0`
pub fn clean(v: Float) -> Float {
    if v.is_nan() || v == 0.0 {
        0.0
    } else {
        v
    }
}
