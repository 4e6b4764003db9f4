// ─────────────────────────────────────────────────────────────────────
// Volute Cavitation Core — Spiral Geometry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Logarithmic-spiral channel shape and its local velocity field.
//!
//! The channel wall follows `r(θ) = r_0 · exp(k·θ)` with opening factor
//! `k = cot(α)`. With `θ = ω·t` the radius becomes a function of time;
//! `k·ω < 0` (inward flow) is as valid as `k·ω > 0` and needs no
//! special-casing anywhere below.

use std::f64::consts::FRAC_PI_2;

use volute_types::config::SpiralParameters;
use volute_types::error::{VoluteError, VoluteResult};

/// Local flow velocity at radius r, split into spiral-path components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityComponents {
    pub v_r_m_s: f64,
    pub v_theta_m_s: f64,
    pub v_total_m_s: f64,
}

fn cot(alpha_rad: f64) -> f64 {
    1.0 / alpha_rad.tan()
}

/// Opening factor `k = cot(α)` for a raw angle.
///
/// Fails for α outside the open interval (0, π/2), where the cotangent
/// is singular, zero, or negative-branch.
pub fn opening_factor(alpha_rad: f64) -> VoluteResult<f64> {
    if !alpha_rad.is_finite() || alpha_rad <= 0.0 || alpha_rad >= FRAC_PI_2 {
        return Err(VoluteError::InvalidGeometry(format!(
            "opening angle must lie strictly inside (0, pi/2), got {alpha_rad}"
        )));
    }
    Ok(cot(alpha_rad))
}

/// Wall radius at angle θ: `r(θ) = r_0 · exp(k·θ)`.
pub fn radius_at_angle(params: &SpiralParameters, theta_rad: f64) -> f64 {
    params.r_0_m() * (cot(params.alpha_rad()) * theta_rad).exp()
}

/// Wall radius at time t, following the rotation `θ = ω·t`.
pub fn radius_at_time(params: &SpiralParameters, t_s: f64) -> f64 {
    params.r_0_m() * (cot(params.alpha_rad()) * params.omega_rad_s() * t_s).exp()
}

/// Velocity components at radius r: `v_r = kωr`, `v_θ = ωr`.
pub fn velocity_components(params: &SpiralParameters, r_m: f64) -> VelocityComponents {
    let k = cot(params.alpha_rad());
    let omega = params.omega_rad_s();
    let v_r = k * omega * r_m;
    let v_theta = omega * r_m;
    VelocityComponents {
        v_r_m_s: v_r,
        v_theta_m_s: v_theta,
        v_total_m_s: v_r.hypot(v_theta),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(r_0: f64, alpha: f64, omega: f64) -> SpiralParameters {
        SpiralParameters::new(r_0, alpha, omega).unwrap()
    }

    #[test]
    fn test_opening_factor_inverts_tangent() {
        for i in 1..90 {
            let alpha = (i as f64).to_radians();
            let k = opening_factor(alpha).unwrap();
            assert!(
                (k * alpha.tan() - 1.0).abs() < 1e-12,
                "k * tan(alpha) != 1 at alpha = {alpha}"
            );
        }
    }

    #[test]
    fn test_opening_factor_rejects_singular_angles() {
        assert!(opening_factor(0.0).is_err());
        assert!(opening_factor(FRAC_PI_2).is_err());
        assert!(opening_factor(-0.3).is_err());
        assert!(opening_factor(3.0).is_err());
        assert!(opening_factor(f64::NAN).is_err());
    }

    #[test]
    fn test_radius_at_time_zero_is_exact() {
        let p = params(0.01, 20f64.to_radians(), 500.0);
        assert_eq!(radius_at_time(&p, 0.0), 0.01);
        let q = params(3.7, 1.2, -80.0);
        assert_eq!(radius_at_time(&q, 0.0), 3.7);
    }

    #[test]
    fn test_radius_monotone_outward_regime() {
        // k > 0 and omega > 0: strictly increasing in t.
        let p = params(0.01, 20f64.to_radians(), 500.0);
        let mut prev = radius_at_time(&p, 0.0);
        for i in 1..=100 {
            let r = radius_at_time(&p, i as f64 * 1e-4);
            assert!(r > prev, "radius not increasing at step {i}");
            prev = r;
        }
    }

    #[test]
    fn test_radius_monotone_inward_regime() {
        // k > 0 and omega < 0: strictly decreasing in t.
        let p = params(0.01, 20f64.to_radians(), -500.0);
        let mut prev = radius_at_time(&p, 0.0);
        for i in 1..=100 {
            let r = radius_at_time(&p, i as f64 * 1e-4);
            assert!(r < prev, "radius not decreasing at step {i}");
            prev = r;
        }
    }

    #[test]
    fn test_radius_at_angle_matches_time_parameterization() {
        let p = params(0.02, 0.5, 120.0);
        for i in 0..20 {
            let t = i as f64 * 1e-3;
            let theta = p.omega_rad_s() * t;
            let from_angle = radius_at_angle(&p, theta);
            let from_time = radius_at_time(&p, t);
            assert!(
                (from_angle - from_time).abs() < 1e-12 * from_time.abs(),
                "parameterizations disagree at t = {t}"
            );
        }
    }

    #[test]
    fn test_velocity_components_consistent() {
        let p = params(0.01, 20f64.to_radians(), 500.0);
        for i in 1..=50 {
            let r = 0.01 * i as f64;
            let v = velocity_components(&p, r);
            let recomputed = (v.v_r_m_s * v.v_r_m_s + v.v_theta_m_s * v.v_theta_m_s).sqrt();
            assert!(
                (v.v_total_m_s - recomputed).abs() < 1e-12 * recomputed,
                "v_total inconsistent at r = {r}"
            );
        }
    }

    #[test]
    fn test_velocity_scales_linearly_with_radius() {
        let p = params(0.01, 0.8, 250.0);
        let v1 = velocity_components(&p, 0.01);
        let v2 = velocity_components(&p, 0.02);
        assert!((v2.v_r_m_s - 2.0 * v1.v_r_m_s).abs() < 1e-12);
        assert!((v2.v_theta_m_s - 2.0 * v1.v_theta_m_s).abs() < 1e-12);
        assert!((v2.v_total_m_s - 2.0 * v1.v_total_m_s).abs() < 1e-12);
    }
}
