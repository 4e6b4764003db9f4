// ─────────────────────────────────────────────────────────────────────
// Volute Cavitation Core — Property-Based Tests (proptest) for volute-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for volute-types using proptest.
//!
//! Covers: construction invariants of the parameter aggregates,
//! serialization re-validation, trajectory bookkeeping.

use proptest::prelude::*;
use volute_types::config::{FluidProperties, SpiralParameters};
use volute_types::state::{BubbleSample, Trajectory};

// ── SpiralParameters Construction Invariants ─────────────────────────

proptest! {
    /// Any angle strictly inside (0, pi/2) with positive radius and
    /// non-zero angular velocity constructs, and accessors round-trip
    /// the inputs exactly.
    #[test]
    fn spiral_valid_inputs_construct(
        r_0 in 1e-6f64..10.0,
        alpha in 1e-3f64..(std::f64::consts::FRAC_PI_2 - 1e-3),
        omega in prop::sample::select(vec![-2000.0, -500.0, -1.0, 1.0, 500.0, 2000.0]),
    ) {
        let p = SpiralParameters::new(r_0, alpha, omega).unwrap();
        prop_assert_eq!(p.r_0_m(), r_0);
        prop_assert_eq!(p.alpha_rad(), alpha);
        prop_assert_eq!(p.omega_rad_s(), omega);
        // The opening factor is finite and non-zero over the whole range.
        let k = 1.0 / alpha.tan();
        prop_assert!(k.is_finite() && k > 0.0);
    }

    /// Angles at or outside the open interval never construct.
    #[test]
    fn spiral_invalid_angle_rejected(
        r_0 in 1e-6f64..10.0,
        offset in 0.0f64..1.0,
    ) {
        prop_assert!(SpiralParameters::new(r_0, -offset, 500.0).is_err());
        prop_assert!(
            SpiralParameters::new(r_0, std::f64::consts::FRAC_PI_2 + offset, 500.0).is_err()
        );
    }

    /// Serialization round-trips through JSON bit-exactly.
    #[test]
    fn spiral_serde_roundtrip(
        r_0 in 1e-6f64..10.0,
        alpha in 1e-3f64..(std::f64::consts::FRAC_PI_2 - 1e-3),
        omega in 1.0f64..2000.0,
    ) {
        let p = SpiralParameters::new(r_0, alpha, omega).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        let q: SpiralParameters = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(p.r_0_m(), q.r_0_m());
        prop_assert_eq!(p.alpha_rad(), q.alpha_rad());
        prop_assert_eq!(p.omega_rad_s(), q.omega_rad_s());
    }
}

// ── FluidProperties Construction Invariants ──────────────────────────

proptest! {
    /// Physical fluids construct and preserve their values; the
    /// threshold sign is left to the caller.
    #[test]
    fn fluid_valid_inputs_construct(
        rho in 1.0f64..2000.0,
        mu in 0.0f64..1.0,
        sigma in 0.0f64..1.0,
        p_0 in 0.0f64..2e5,
        p_vap in 0.0f64..2e5,
    ) {
        let f = FluidProperties::new(rho, mu, sigma, p_0, p_vap).unwrap();
        prop_assert_eq!(f.rho_kg_m3(), rho);
        prop_assert_eq!(f.mu_pa_s(), mu);
        prop_assert_eq!(f.sigma_n_m(), sigma);
        prop_assert_eq!(f.p_0_pa(), p_0);
        prop_assert_eq!(f.p_vap_pa(), p_vap);
    }

    /// Non-positive density never constructs.
    #[test]
    fn fluid_nonpositive_density_rejected(rho in -2000.0f64..=0.0) {
        prop_assert!(FluidProperties::new(rho, 1e-3, 0.07, 101_325.0, 2339.0).is_err());
    }
}

// ── Trajectory Bookkeeping ───────────────────────────────────────────

proptest! {
    /// Pushed samples come back in order through every column view.
    #[test]
    fn trajectory_views_preserve_order(n in 1usize..200) {
        let mut traj = Trajectory::with_capacity(n);
        for i in 0..n {
            traj.push(BubbleSample {
                t_s: i as f64 * 1e-4,
                r_m: 1e-6 + i as f64 * 1e-9,
                r_dot_m_s: -(i as f64),
            });
        }
        prop_assert_eq!(traj.len(), n);
        let t = traj.times_s();
        let r = traj.radii_m();
        let rd = traj.wall_speeds_m_s();
        for i in 0..n {
            prop_assert_eq!(t[i], i as f64 * 1e-4);
            prop_assert_eq!(r[i], 1e-6 + i as f64 * 1e-9);
            prop_assert_eq!(rd[i], -(i as f64));
        }
    }
}
