// ─────────────────────────────────────────────────────────────────────
// Volute Cavitation Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Density of water at 20 °C (kg/m³)
pub const WATER_DENSITY_20C: f64 = 998.0;

/// Dynamic viscosity of water at 20 °C (Pa·s)
pub const WATER_VISCOSITY_20C: f64 = 1.0e-3;

/// Surface tension of the water/air interface at 20 °C (N/m)
pub const WATER_SURFACE_TENSION_20C: f64 = 0.0728;

/// Vapor pressure of water at 20 °C (Pa)
pub const WATER_VAPOR_PRESSURE_20C: f64 = 2339.0;

/// Standard atmospheric pressure (Pa)
pub const ATMOSPHERIC_PRESSURE: f64 = 101_325.0;

/// Default nucleus radius for bubble runs (m) - a 1 µm seed bubble.
pub const DEFAULT_NUCLEUS_RADIUS_M: f64 = 1.0e-6;
