// ─────────────────────────────────────────────────────────────────────
// Volute Cavitation Core — Cavitation Thresholds
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Closed-form cavitation onset conditions.
//!
//! Independent of the numerical bubble simulation: these are the
//! analytic critical quantities at which the Bernoulli pressure first
//! reaches the vapor pressure on the spiral path.

use volute_types::config::{FluidProperties, SpiralParameters};
use volute_types::error::{VoluteError, VoluteResult};
use volute_types::state::CriticalConditions;

use crate::geometry::{opening_factor, radius_at_time};

/// Cavitation threshold `Δp = p_0 − p_vap`.
///
/// A negative value means the fluid is already below vapor pressure;
/// it is returned as-is for the caller to interpret.
pub fn cavitation_threshold(p_0_pa: f64, p_vap_pa: f64) -> f64 {
    p_0_pa - p_vap_pa
}

fn check_threshold_inputs(rho_kg_m3: f64, delta_p_pa: f64) -> VoluteResult<()> {
    if !rho_kg_m3.is_finite() || rho_kg_m3 <= 0.0 {
        return Err(VoluteError::InvalidParameter(format!(
            "density must be finite and > 0, got {rho_kg_m3}"
        )));
    }
    if !delta_p_pa.is_finite() || delta_p_pa < 0.0 {
        return Err(VoluteError::InvalidParameter(format!(
            "threshold delta_p must be finite and >= 0 under the square root, got {delta_p_pa}"
        )));
    }
    Ok(())
}

/// Critical angular velocity ω_c at the spiral inlet r(t=0) = r_0:
/// `ω_c = (1/(k·r_0)) · √(2Δp / (ρ·(1+k²)))`.
pub fn critical_angular_velocity(
    params: &SpiralParameters,
    rho_kg_m3: f64,
    delta_p_pa: f64,
) -> VoluteResult<f64> {
    check_threshold_inputs(rho_kg_m3, delta_p_pa)?;
    let r = radius_at_time(params, 0.0);
    let k = opening_factor(params.alpha_rad())?;
    Ok((1.0 / (k * r)) * (2.0 * delta_p_pa / (rho_kg_m3 * (1.0 + k * k))).sqrt())
}

/// Critical radius at which cavitation may begin:
/// `r_crit = (1/(ω·√(1+k²))) · √(2Δp/ρ)`.
pub fn critical_radius(
    params: &SpiralParameters,
    rho_kg_m3: f64,
    delta_p_pa: f64,
) -> VoluteResult<f64> {
    check_threshold_inputs(rho_kg_m3, delta_p_pa)?;
    let k = opening_factor(params.alpha_rad())?;
    let omega = params.omega_rad_s();
    Ok((1.0 / (omega * (1.0 + k * k).sqrt())) * (2.0 * delta_p_pa / rho_kg_m3).sqrt())
}

/// Time at which the wall radius reaches r_crit:
/// `t_crit = (1/(k·ω)) · ln(r_crit / r_0)`.
///
/// Negative when `r_crit < r_0`: the critical radius lies behind the
/// inlet, so the threshold is already exceeded at t = 0 (or is never
/// reached going forward). The sign is preserved, never clamped.
pub fn critical_time(params: &SpiralParameters, r_crit_m: f64) -> VoluteResult<f64> {
    if !r_crit_m.is_finite() || r_crit_m <= 0.0 {
        return Err(VoluteError::InvalidParameter(format!(
            "critical radius must be finite and > 0, got {r_crit_m}"
        )));
    }
    let k = opening_factor(params.alpha_rad())?;
    Ok((1.0 / (k * params.omega_rad_s())) * (r_crit_m / params.r_0_m()).ln())
}

/// Compute all critical cavitation conditions from one consistent Δp.
/// This is the sole constructor of `CriticalConditions`.
pub fn compute_critical_conditions(
    params: &SpiralParameters,
    fluid: &FluidProperties,
) -> VoluteResult<CriticalConditions> {
    let delta_p_pa = cavitation_threshold(fluid.p_0_pa(), fluid.p_vap_pa());
    let omega_c_rad_s = critical_angular_velocity(params, fluid.rho_kg_m3(), delta_p_pa)?;
    let r_crit_m = critical_radius(params, fluid.rho_kg_m3(), delta_p_pa)?;
    let t_crit_s = critical_time(params, r_crit_m)?;
    Ok(CriticalConditions {
        delta_p_pa,
        omega_c_rad_s,
        r_crit_m,
        t_crit_s,
    })
}
