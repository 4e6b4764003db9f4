// ─────────────────────────────────────────────────────────────────────
// Volute Cavitation Core — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Bubble integration variables: radius and wall velocity.
/// Owned by exactly one simulation run; `r_m > 0` except at collapse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleState {
    pub r_m: f64,
    pub r_dot_m_s: f64,
}

/// One reported trajectory point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubbleSample {
    pub t_s: f64,
    pub r_m: f64,
    pub r_dot_m_s: f64,
}

/// Ordered `(t, R, R_dot)` samples on the reporting grid.
///
/// Append-only while a run is in flight; the returned value exposes no
/// mutating access, so a finished trajectory stays immutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trajectory {
    samples: Vec<BubbleSample>,
}

impl Trajectory {
    pub fn with_capacity(n: usize) -> Self {
        Trajectory {
            samples: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, sample: BubbleSample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&BubbleSample> {
        self.samples.last()
    }

    pub fn samples(&self) -> &[BubbleSample] {
        &self.samples
    }

    /// Sample instants as a dense array.
    pub fn times_s(&self) -> Array1<f64> {
        self.samples.iter().map(|s| s.t_s).collect()
    }

    /// Bubble radii as a dense array.
    pub fn radii_m(&self) -> Array1<f64> {
        self.samples.iter().map(|s| s.r_m).collect()
    }

    /// Bubble wall velocities as a dense array.
    pub fn wall_speeds_m_s(&self) -> Array1<f64> {
        self.samples.iter().map(|s| s.r_dot_m_s).collect()
    }
}

/// Terminal status of one bubble-dynamics run. Exactly one per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// Reached t_max with the bubble intact.
    Completed,
    /// Radius crossed the collapse floor before t_max.
    Collapsed { t_end_s: f64 },
    /// Stepping produced a non-finite state or stalled before the floor
    /// was reached; the partial trajectory is preserved.
    Failed { t_end_s: f64, message: String },
}

impl RunOutcome {
    pub fn is_terminal_early(&self) -> bool {
        !matches!(self, RunOutcome::Completed)
    }
}

/// Bubble-dynamics run result: reporting-grid trajectory, terminal
/// status, and stepper diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub trajectory: Trajectory,
    pub outcome: RunOutcome,
    pub n_steps: usize,
    pub n_rejected: usize,
    pub solve_time_ms: f64,
}

/// Closed-form critical cavitation conditions.
///
/// Produced only by `compute_critical_conditions`, so all four values
/// always derive from the same threshold Δp. `t_crit_s < 0` means the
/// critical radius lies behind the spiral inlet (the threshold is
/// already exceeded at t = 0, or is never reached going forward); the
/// sign is preserved, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriticalConditions {
    pub delta_p_pa: f64,
    pub omega_c_rad_s: f64,
    pub r_crit_m: f64,
    pub t_crit_s: f64,
}
