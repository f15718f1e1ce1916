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

/// Something able to transform projected (planar) coordinates
/// into geographic ones.
pub trait CoordinateTransform {
    /// Transforms `(easting, northing)`, in meters, into
    /// `(latitude, longitude)`, in degrees.
    fn to_geographic(&self, easting: Float, northing: Float) -> (Float, Float);
}

/// A Lambert Conformal Conic projection with two standard
/// parallels, on an ellipsoid (EPSG method 9802).
///
/// Angles are stored in Radians.
#[derive(Debug, Clone, Copy)]
pub struct LambertConformalConic {
    /// Semi-major axis of the ellipsoid, in meters
    pub semi_major_axis: Float,

    /// Inverse flattening of the ellipsoid
    pub inverse_flattening: Float,

    /// First standard parallel
    pub first_parallel: Float,

    /// Second standard parallel
    pub second_parallel: Float,

    /// Latitude of the false origin
    pub origin_latitude: Float,

    /// Longitude of the false origin
    pub origin_longitude: Float,

    /// Easting at the false origin, in meters
    pub false_easting: Float,

    /// Northing at the false origin, in meters
    pub false_northing: Float,
}

/// ETRS89 / LCC Europe, the projection used by German test
/// reference years. The GRS80 ellipsoid is used, and the results are
/// considered to be WGS84.
pub const EPSG_3034: LambertConformalConic = LambertConformalConic {
    semi_major_axis: 6378137.0,
    inverse_flattening: 298.257222101,
    first_parallel: 35. * PI / 180.,
    second_parallel: 65. * PI / 180.,
    origin_latitude: 52. * PI / 180.,
    origin_longitude: 10. * PI / 180.,
    false_easting: 4000000.,
    false_northing: 2800000.,
};

impl LambertConformalConic {
    fn eccentricity(&self) -> Float {
        let f = 1. / self.inverse_flattening;
        (2. * f - f * f).sqrt()
    }

    fn m(&self, phi: Float) -> Float {
        let e = self.eccentricity();
        phi.cos() / (1. - (e * phi.sin()).powi(2)).sqrt()
    }

    fn t(&self, phi: Float) -> Float {
        let e = self.eccentricity();
        let esin = e * phi.sin();
        (PI / 4. - phi / 2.).tan() / ((1. - esin) / (1. + esin)).powf(e / 2.)
    }

    /// Returns `(n, F, r0)`
    fn cone(&self) -> (Float, Float, Float) {
        let m1 = self.m(self.first_parallel);
        let m2 = self.m(self.second_parallel);
        let t1 = self.t(self.first_parallel);
        let t2 = self.t(self.second_parallel);
        let t0 = self.t(self.origin_latitude);

        let n = (m1.ln() - m2.ln()) / (t1.ln() - t2.ln());
        let f = m1 / (n * t1.powf(n));
        let r0 = self.semi_major_axis * f * t0.powf(n);
        (n, f, r0)
    }
}

impl CoordinateTransform for LambertConformalConic {
    fn to_geographic(&self, easting: Float, northing: Float) -> (Float, Float) {
        let (n, f, r0) = self.cone();
        let e = self.eccentricity();

        let de = easting - self.false_easting;
        let dn = r0 - (northing - self.false_northing);

        let r = n.signum() * (de * de + dn * dn).sqrt();
        let t = (r / (self.semi_major_axis * f)).powf(1. / n);
        let theta = if n > 0. {
            de.atan2(dn)
        } else {
            (-de).atan2(-dn)
        };

        let longitude = theta / n + self.origin_longitude;

        // Latitude needs to be iterated
        let mut latitude = PI / 2. - 2. * t.atan();
        for _ in 0..15 {
            let esin = e * latitude.sin();
            let next = PI / 2. - 2. * (t * ((1. - esin) / (1. + esin)).powf(e / 2.)).atan();
            let done = (next - latitude).abs() < 1e-12;
            latitude = next;
            if done {
                break;
            }
        }

        (latitude.to_degrees(), longitude.to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_false_origin() {
        let (lat, lon) = EPSG_3034.to_geographic(4000000., 2800000.);
        assert_abs_diff_eq!(lat, 52., epsilon = 1e-6);
        assert_abs_diff_eq!(lon, 10., epsilon = 1e-6);
    }

    #[test]
    fn test_central_europe() {
        // A grid cell of the German TRY data set, near Stuttgart
        let (lat, lon) = EPSG_3034.to_geographic(3936500., 2449500.);
        assert!(lat > 47. && lat < 55., "lat = {}", lat);
        assert!(lon > 8. && lon < 10., "lon = {}", lon);
        assert_abs_diff_eq!(lat, 48.8, epsilon = 0.3);
    }

    #[test]
    fn test_west_is_west() {
        let (_, lon_west) = EPSG_3034.to_geographic(3500000., 2800000.);
        let (_, lon_east) = EPSG_3034.to_geographic(4500000., 2800000.);
        assert!(lon_west < 10.);
        assert!(lon_east > 10.);
    }
}
