//! Ambient pressure along the flow path.
//!
//! Bernoulli approximation on the spiral streamline: the local pressure
//! drops with the square of the local flow speed. The `AmbientPressure`
//! trait is the seam the bubble integrator forces through, so a test or
//! caller can substitute any other pressure history for the spiral one.

use volute_types::config::{FluidProperties, SpiralParameters};

use crate::geometry::{radius_at_time, velocity_components};

/// Time-dependent ambient pressure forcing for the bubble equation.
pub trait AmbientPressure {
    /// Ambient pressure p_inf (Pa) at time t.
    fn pressure_at(&self, t_s: f64) -> f64;
}

/// Bernoulli pressure at time t on the spiral path:
/// `p_inf(t) = p_0 − ½·ρ·v_total(r(t))²`.
///
/// Pure function of its arguments; safe to call from parallel sweeps.
pub fn external_pressure(t_s: f64, params: &SpiralParameters, rho_kg_m3: f64, p_0_pa: f64) -> f64 {
    let r = radius_at_time(params, t_s);
    let v = velocity_components(params, r);
    p_0_pa - 0.5 * rho_kg_m3 * v.v_total_m_s * v.v_total_m_s
}

/// Spiral-channel pressure field for a given working fluid.
#[derive(Debug, Clone, Copy)]
pub struct BernoulliSpiralPressure<'a> {
    params: &'a SpiralParameters,
    rho_kg_m3: f64,
    p_0_pa: f64,
}

impl<'a> BernoulliSpiralPressure<'a> {
    pub fn new(params: &'a SpiralParameters, fluid: &FluidProperties) -> Self {
        BernoulliSpiralPressure {
            params,
            rho_kg_m3: fluid.rho_kg_m3(),
            p_0_pa: fluid.p_0_pa(),
        }
    }
}

impl AmbientPressure for BernoulliSpiralPressure<'_> {
    fn pressure_at(&self, t_s: f64) -> f64 {
        external_pressure(t_s, self.params, self.rho_kg_m3, self.p_0_pa)
    }
}

/// Still-fluid ambient pressure, constant in time.
#[derive(Debug, Clone, Copy)]
pub struct UniformPressure {
    pub p_pa: f64,
}

impl AmbientPressure for UniformPressure {
    fn pressure_at(&self, _t_s: f64) -> f64 {
        self.p_pa
    }
}
