// ─────────────────────────────────────────────────────────────────────
// Volute Cavitation Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::error::{VoluteError, VoluteResult};

/// Logarithmic-spiral channel parameters.
///
/// Invariants, enforced at construction and on every deserialization:
/// `r_0_m > 0`, `alpha_rad` strictly inside (0, π/2), `omega_rad_s != 0`.
/// Values are immutable once constructed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "SpiralParametersRaw", into = "SpiralParametersRaw")]
pub struct SpiralParameters {
    r_0_m: f64,
    alpha_rad: f64,
    omega_rad_s: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct SpiralParametersRaw {
    r_0_m: f64,
    alpha_rad: f64,
    omega_rad_s: f64,
}

impl SpiralParameters {
    pub fn new(r_0_m: f64, alpha_rad: f64, omega_rad_s: f64) -> VoluteResult<Self> {
        if !r_0_m.is_finite() || r_0_m <= 0.0 {
            return Err(VoluteError::InvalidParameter(format!(
                "r_0_m must be finite and > 0, got {r_0_m}"
            )));
        }
        if !alpha_rad.is_finite() || alpha_rad <= 0.0 || alpha_rad >= FRAC_PI_2 {
            return Err(VoluteError::InvalidGeometry(format!(
                "alpha_rad must lie strictly inside (0, pi/2), got {alpha_rad}"
            )));
        }
        if !omega_rad_s.is_finite() || omega_rad_s == 0.0 {
            return Err(VoluteError::InvalidParameter(format!(
                "omega_rad_s must be finite and non-zero, got {omega_rad_s}"
            )));
        }
        Ok(SpiralParameters {
            r_0_m,
            alpha_rad,
            omega_rad_s,
        })
    }

    /// Inlet radius r_0 (m).
    pub fn r_0_m(&self) -> f64 {
        self.r_0_m
    }

    /// Spiral opening angle α (rad).
    pub fn alpha_rad(&self) -> f64 {
        self.alpha_rad
    }

    /// Channel angular velocity ω (rad/s).
    pub fn omega_rad_s(&self) -> f64 {
        self.omega_rad_s
    }
}

impl TryFrom<SpiralParametersRaw> for SpiralParameters {
    type Error = VoluteError;

    fn try_from(raw: SpiralParametersRaw) -> VoluteResult<Self> {
        SpiralParameters::new(raw.r_0_m, raw.alpha_rad, raw.omega_rad_s)
    }
}

impl From<SpiralParameters> for SpiralParametersRaw {
    fn from(p: SpiralParameters) -> Self {
        SpiralParametersRaw {
            r_0_m: p.r_0_m,
            alpha_rad: p.alpha_rad,
            omega_rad_s: p.omega_rad_s,
        }
    }
}

/// Working-fluid properties.
///
/// Invariants: `rho_kg_m3 > 0`, `mu_pa_s >= 0`, `sigma_n_m >= 0`, all
/// pressures finite. `p_0_pa > p_vap_pa` is NOT enforced: a negative
/// cavitation threshold is representable and left to the caller to
/// interpret.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "FluidPropertiesRaw", into = "FluidPropertiesRaw")]
pub struct FluidProperties {
    rho_kg_m3: f64,
    mu_pa_s: f64,
    sigma_n_m: f64,
    p_0_pa: f64,
    p_vap_pa: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct FluidPropertiesRaw {
    rho_kg_m3: f64,
    mu_pa_s: f64,
    sigma_n_m: f64,
    p_0_pa: f64,
    p_vap_pa: f64,
}

impl FluidProperties {
    pub fn new(
        rho_kg_m3: f64,
        mu_pa_s: f64,
        sigma_n_m: f64,
        p_0_pa: f64,
        p_vap_pa: f64,
    ) -> VoluteResult<Self> {
        if !rho_kg_m3.is_finite() || rho_kg_m3 <= 0.0 {
            return Err(VoluteError::InvalidParameter(format!(
                "rho_kg_m3 must be finite and > 0, got {rho_kg_m3}"
            )));
        }
        if !mu_pa_s.is_finite() || mu_pa_s < 0.0 {
            return Err(VoluteError::InvalidParameter(format!(
                "mu_pa_s must be finite and >= 0, got {mu_pa_s}"
            )));
        }
        if !sigma_n_m.is_finite() || sigma_n_m < 0.0 {
            return Err(VoluteError::InvalidParameter(format!(
                "sigma_n_m must be finite and >= 0, got {sigma_n_m}"
            )));
        }
        if !p_0_pa.is_finite() || !p_vap_pa.is_finite() {
            return Err(VoluteError::InvalidParameter(format!(
                "pressures must be finite, got p_0_pa={p_0_pa}, p_vap_pa={p_vap_pa}"
            )));
        }
        Ok(FluidProperties {
            rho_kg_m3,
            mu_pa_s,
            sigma_n_m,
            p_0_pa,
            p_vap_pa,
        })
    }

    /// Density ρ (kg/m³).
    pub fn rho_kg_m3(&self) -> f64 {
        self.rho_kg_m3
    }

    /// Dynamic viscosity μ (Pa·s).
    pub fn mu_pa_s(&self) -> f64 {
        self.mu_pa_s
    }

    /// Surface tension σ (N/m).
    pub fn sigma_n_m(&self) -> f64 {
        self.sigma_n_m
    }

    /// Ambient reference pressure p_0 (Pa).
    pub fn p_0_pa(&self) -> f64 {
        self.p_0_pa
    }

    /// Vapor pressure p_vap (Pa).
    pub fn p_vap_pa(&self) -> f64 {
        self.p_vap_pa
    }
}

impl TryFrom<FluidPropertiesRaw> for FluidProperties {
    type Error = VoluteError;

    fn try_from(raw: FluidPropertiesRaw) -> VoluteResult<Self> {
        FluidProperties::new(
            raw.rho_kg_m3,
            raw.mu_pa_s,
            raw.sigma_n_m,
            raw.p_0_pa,
            raw.p_vap_pa,
        )
    }
}

impl From<FluidProperties> for FluidPropertiesRaw {
    fn from(f: FluidProperties) -> Self {
        FluidPropertiesRaw {
            rho_kg_m3: f.rho_kg_m3,
            mu_pa_s: f.mu_pa_s,
            sigma_n_m: f.sigma_n_m,
            p_0_pa: f.p_0_pa,
            p_vap_pa: f.p_vap_pa,
        }
    }
}

/// Initial bubble condition (optional in JSON config).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BubbleConfig {
    /// Nucleus radius R_0 (default: 1e-6 m)
    #[serde(default = "default_nucleus_radius")]
    pub r_0_m: f64,
    /// Initial wall velocity R_dot_0 (default: 0.0 m/s)
    #[serde(default = "default_wall_speed")]
    pub r_dot_0_m_s: f64,
}

fn default_nucleus_radius() -> f64 {
    crate::constants::DEFAULT_NUCLEUS_RADIUS_M
}
fn default_wall_speed() -> f64 {
    0.0
}

impl Default for BubbleConfig {
    fn default() -> Self {
        BubbleConfig {
            r_0_m: default_nucleus_radius(),
            r_dot_0_m_s: default_wall_speed(),
        }
    }
}

/// Adaptive-stepper settings (optional in JSON config).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Relative tolerance (default: 1e-8)
    #[serde(default = "default_rel_tol")]
    pub rel_tol: f64,
    /// Absolute tolerance (default: 1e-10)
    #[serde(default = "default_abs_tol")]
    pub abs_tol: f64,
    /// Integration horizon (default: 0.1 s)
    #[serde(default = "default_t_max")]
    pub t_max_s: f64,
    /// Number of evenly spaced reporting instants (default: 1000)
    #[serde(default = "default_n_points")]
    pub n_points: usize,
    /// Collapse floor as a fraction of R_0 (default: 1e-3)
    #[serde(default = "default_collapse_floor_fraction")]
    pub collapse_floor_fraction: f64,
}

fn default_rel_tol() -> f64 {
    1e-8
}
fn default_abs_tol() -> f64 {
    1e-10
}
fn default_t_max() -> f64 {
    0.1
}
fn default_n_points() -> usize {
    1000
}
fn default_collapse_floor_fraction() -> f64 {
    1e-3
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            rel_tol: default_rel_tol(),
            abs_tol: default_abs_tol(),
            t_max_s: default_t_max(),
            n_points: default_n_points(),
            collapse_floor_fraction: default_collapse_floor_fraction(),
        }
    }
}

/// Top-level channel configuration.
/// Maps 1:1 to the volute_config.json schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub channel_name: String,
    pub spiral: SpiralParameters,
    pub fluid: FluidProperties,
    #[serde(default)]
    pub bubble: BubbleConfig,
    #[serde(default)]
    pub solver: SolverConfig,
}

impl ChannelConfig {
    /// Load from a JSON file. Nested parameter blocks are re-validated
    /// during deserialization, so an invalid file never yields a config.
    pub fn from_file(path: &str) -> VoluteResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Build a path relative to the repository root.
    /// CARGO_MANIFEST_DIR points to crates/volute-types/ at compile time.
    fn project_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
    }

    fn config_path(relative: &str) -> String {
        project_root().join(relative).to_string_lossy().to_string()
    }

    #[test]
    fn test_load_reference_config() {
        let cfg = ChannelConfig::from_file(&config_path("volute_config.json")).unwrap();
        assert_eq!(cfg.channel_name, "Water-20C-Reference");
        assert!((cfg.spiral.r_0_m() - 0.01).abs() < 1e-12);
        assert!((cfg.spiral.omega_rad_s() - 500.0).abs() < 1e-12);
        assert!((cfg.fluid.rho_kg_m3() - 998.0).abs() < 1e-12);
        assert!((cfg.fluid.p_0_pa() - 101_325.0).abs() < 1e-9);
        assert!((cfg.fluid.p_vap_pa() - 2339.0).abs() < 1e-9);
        assert_eq!(cfg.solver.n_points, 1000);
        assert!((cfg.solver.rel_tol - 1e-8).abs() < 1e-20);
    }

    #[test]
    fn test_bubble_and_solver_defaults_apply() {
        let json = r#"{
            "channel_name": "minimal",
            "spiral": { "r_0_m": 0.01, "alpha_rad": 0.3490658503988659, "omega_rad_s": 500.0 },
            "fluid": { "rho_kg_m3": 998.0, "mu_pa_s": 0.001, "sigma_n_m": 0.0728,
                       "p_0_pa": 101325.0, "p_vap_pa": 2339.0 }
        }"#;
        let cfg: ChannelConfig = serde_json::from_str(json).unwrap();
        assert!((cfg.bubble.r_0_m - 1e-6).abs() < 1e-18);
        assert_eq!(cfg.bubble.r_dot_0_m_s, 0.0);
        assert_eq!(cfg.solver.n_points, 1000);
        assert!((cfg.solver.t_max_s - 0.1).abs() < 1e-12);
        assert!((cfg.solver.collapse_floor_fraction - 1e-3).abs() < 1e-15);
    }

    #[test]
    fn test_roundtrip_serialization() {
        let cfg = ChannelConfig::from_file(&config_path("volute_config.json")).unwrap();
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let cfg2: ChannelConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.channel_name, cfg2.channel_name);
        assert!((cfg.spiral.alpha_rad() - cfg2.spiral.alpha_rad()).abs() < 1e-15);
        assert!((cfg.fluid.sigma_n_m() - cfg2.fluid.sigma_n_m()).abs() < 1e-15);
        assert_eq!(cfg.solver.n_points, cfg2.solver.n_points);
    }

    #[test]
    fn test_spiral_rejects_alpha_at_bounds() {
        assert!(SpiralParameters::new(0.01, 0.0, 500.0).is_err());
        assert!(SpiralParameters::new(0.01, FRAC_PI_2, 500.0).is_err());
        assert!(SpiralParameters::new(0.01, -0.1, 500.0).is_err());
        assert!(SpiralParameters::new(0.01, 2.0, 500.0).is_err());
        assert!(SpiralParameters::new(0.01, f64::NAN, 500.0).is_err());
    }

    #[test]
    fn test_spiral_rejects_bad_radius_and_omega() {
        assert!(SpiralParameters::new(0.0, 0.3, 500.0).is_err());
        assert!(SpiralParameters::new(-0.01, 0.3, 500.0).is_err());
        assert!(SpiralParameters::new(0.01, 0.3, 0.0).is_err());
        assert!(SpiralParameters::new(0.01, 0.3, f64::INFINITY).is_err());
        // Negative omega is a valid physical regime.
        assert!(SpiralParameters::new(0.01, 0.3, -500.0).is_ok());
    }

    #[test]
    fn test_fluid_rejects_nonphysical_values() {
        assert!(FluidProperties::new(0.0, 0.001, 0.07, 101325.0, 2339.0).is_err());
        assert!(FluidProperties::new(-1.0, 0.001, 0.07, 101325.0, 2339.0).is_err());
        assert!(FluidProperties::new(998.0, -0.001, 0.07, 101325.0, 2339.0).is_err());
        assert!(FluidProperties::new(998.0, 0.001, -0.07, 101325.0, 2339.0).is_err());
        assert!(FluidProperties::new(998.0, 0.001, 0.07, f64::NAN, 2339.0).is_err());
        // Inverted pressures are allowed: the threshold may be negative.
        assert!(FluidProperties::new(998.0, 0.001, 0.07, 2000.0, 2339.0).is_ok());
    }

    #[test]
    fn test_deserialization_revalidates() {
        let bad = r#"{ "r_0_m": 0.01, "alpha_rad": 1.5707963267948966, "omega_rad_s": 500.0 }"#;
        assert!(serde_json::from_str::<SpiralParameters>(bad).is_err());
        let good = r#"{ "r_0_m": 0.01, "alpha_rad": 0.7853981633974483, "omega_rad_s": -20.0 }"#;
        let p: SpiralParameters = serde_json::from_str(good).unwrap();
        assert!((p.omega_rad_s() + 20.0).abs() < 1e-12);
    }
}
