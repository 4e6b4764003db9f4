// ─────────────────────────────────────────────────────────────────────
// Volute Cavitation Core — Kernel
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Cavitation kernel for logarithmic-spiral channels.
//!
//! Layered as geometry → pressure → thresholds → bubble dynamics. All
//! entry points are pure functions of their inputs (or operate on a
//! run-local state), so independent evaluations can be fanned out by a
//! parallel caller without synchronization.

pub mod bubble;
pub mod cavitation;
pub mod geometry;
pub mod pressure;
