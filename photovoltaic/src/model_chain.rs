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
use crate::engine::{DcOutput, EnvironmentalSeries, PhysicsEngine, PvSystem};
use crate::error::PhysicsEngineError;
use crate::Float;
use weather::atmosphere::{absolute_air_mass, alt2pres, relative_air_mass};

/// The plane-of-array irradiance components, in W/m2
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaneOfArray {
    /// Angle of incidence of the beam, in Radians
    pub aoi: Float,
    /// Beam irradiance
    pub beam: Float,
    /// Diffuse irradiance from the sky (isotropic)
    pub sky_diffuse: Float,
    /// Irradiance reflected by the ground
    pub ground_diffuse: Float,
}

impl PlaneOfArray {
    /// Sum of all components
    pub fn global(&self) -> Float {
        self.beam + self.sky_diffuse + self.ground_diffuse
    }
}

/// The default [`PhysicsEngine`].
///
/// For every timestep, it:
/// 1. Finds the position of the sun (Duffie and Beckman)
/// 2. Transposes the irradiance into the plane of the modules, using an
///    isotropic sky and the ground reflectance
/// 3. Reduces the beam component by reflection at the module surface
///    (ASHRAE incidence angle modifier)
/// 4. Estimates the cell temperature (SAPM)
/// 5. Corrects for the spectrum (air mass), when the module has the
///    coefficients for it
/// 6. Finds the maximum power point of the modules and scales it to
///    the whole system
/// 7. Subtracts the DC ohmic and mismatch losses
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelChain {
    /// The `b0` coefficient of the ASHRAE incidence angle modifier
    pub iam_b0: Float,
}

impl std::default::Default for ModelChain {
    fn default() -> Self {
        Self { iam_b0: 0.05 }
    }
}

impl ModelChain {
    /// Angle of incidence and plane-of-array irradiance
    ///
    /// `zenith` and `azimuth` are the position of the sun in Radians, with the
    /// azimuth measured from the South (West positive). `surface_tilt` and
    /// `surface_azimuth` are in degrees, the latter measured clockwise from the North.
    #[allow(clippy::too_many_arguments)]
    pub fn plane_of_array(
        zenith: Float,
        azimuth: Float,
        surface_tilt: Float,
        surface_azimuth: Float,
        dni: Float,
        ghi: Float,
        dhi: Float,
        albedo: Float,
    ) -> PlaneOfArray {
        let beta = surface_tilt.to_radians();
        let gamma = (surface_azimuth - 180.).to_radians();

        let cos_aoi = (zenith.cos() * beta.cos()
            + zenith.sin() * beta.sin() * (azimuth - gamma).cos())
        .clamp(-1., 1.);
        let aoi = cos_aoi.acos();

        let beam = if zenith.cos() > 0. { (dni * cos_aoi).max(0.) } else { 0. };
        PlaneOfArray {
            aoi,
            beam,
            sky_diffuse: dhi * (1. + beta.cos()) / 2.,
            ground_diffuse: ghi * albedo * (1. - beta.cos()) / 2.,
        }
    }

    /// Fraction of the beam irradiance that gets through the module cover
    pub fn incidence_angle_modifier(&self, aoi: Float) -> Float {
        let cos_aoi = aoi.cos();
        if cos_aoi <= 0. {
            return 0.;
        }
        (1. - self.iam_b0 * (1. / cos_aoi - 1.)).clamp(0., 1.)
    }
}

impl PhysicsEngine for ModelChain {
    fn name(&self) -> &'static str {
        "model chain"
    }

    fn dc_output(
        &self,
        system: &PvSystem,
        environment: &EnvironmentalSeries,
    ) -> Result<DcOutput, PhysicsEngineError> {
        system.validate()?;
        environment.check()?;

        let n = environment.len();
        let modules = system.modules();
        let strings = system.strings_per_inverter as Float;
        let fallback_pressure = alt2pres(environment.location.altitude);

        // Ohmic resistance of the array, from the losses at STC
        let (i_ref, v_ref) = system.module.reference_mpp();
        let array_i_ref = i_ref * strings;
        let resistance = if system.losses.dc_ohmic_percent > 0. && array_i_ref > 0. {
            v_ref * system.modules_per_string / array_i_ref * system.losses.dc_ohmic_percent
                / 100.
        } else {
            0.
        };
        let mismatch = 1. - system.losses.mismatch_percent / 100.;

        let mut ret = DcOutput {
            p_mp: Vec::with_capacity(n),
            v_mp: Vec::with_capacity(n),
        };

        for i in 0..n {
            let sun = environment.location.sun_position(&environment.timestamps[i]);
            if !sun.is_up() {
                ret.p_mp.push(0.);
                ret.v_mp.push(0.);
                continue;
            }

            let poa = Self::plane_of_array(
                sun.zenith,
                sun.azimuth,
                system.surface_tilt,
                system.surface_azimuth,
                environment.dni[i],
                environment.ghi[i],
                environment.dhi[i],
                environment.albedo[i],
            );
            let cell_temperature = system.thermal_model.cell_temperature(
                poa.global(),
                environment.temp_air[i],
                environment.wind_speed[i],
            );

            let pressure = if environment.pressure[i] > 0. {
                environment.pressure[i]
            } else {
                fallback_pressure
            };
            let air_mass = absolute_air_mass(relative_air_mass(sun.zenith), pressure);
            let spectral = system.module.spectral_factor(air_mass);

            let effective = spectral
                * (poa.beam * self.incidence_angle_modifier(poa.aoi)
                    + poa.sky_diffuse
                    + poa.ground_diffuse);

            let (i_mp, v_mp) = system.module.max_power_point(effective, cell_temperature);
            let array_i = i_mp * strings;
            let array_v = v_mp * system.modules_per_string;
            let mut p = i_mp * v_mp * modules;

            p -= array_i * array_i * resistance;
            p *= mismatch;

            ret.p_mp.push(p);
            ret.v_mp.push(array_v);
        }

        Ok(ret)
    }
}
