// ─────────────────────────────────────────────────────────────────────
// Volute Cavitation Core — Bubble Dynamics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Rayleigh–Plesset bubble dynamics under the spiral pressure field.
//!
//! The bubble interior is held at constant gas pressure `p_g = p_vap`.
//! This is a deliberate simplification inherited from the reference
//! behavior (no polytropic gas law); it materially softens rebound
//! after collapse and must not be "fixed" without revalidating every
//! collapse-time expectation downstream.
//!
//! The R → 0 singularity of the equation is the physical collapse and
//! is handled as a terminal event: the run ends `Collapsed` when the
//! radius crosses a configurable floor, and `Failed` when stepping
//! degenerates (non-finite state, step-size underflow) before the
//! floor is reached. A partial trajectory is preserved in both cases.

use std::time::Instant;

use ndarray::Array1;

use volute_math::rk45::{DormandPrince45, OdeSystem, StepOutcome, StepRecord};
use volute_types::config::{
    BubbleConfig, ChannelConfig, FluidProperties, SolverConfig, SpiralParameters,
};
use volute_types::error::{VoluteError, VoluteResult};
use volute_types::state::{BubbleSample, BubbleState, RunOutcome, SimulationResult, Trajectory};

use crate::pressure::{AmbientPressure, BernoulliSpiralPressure};

/// Runaway guard: a run that has not terminated after this many
/// accepted steps is reported as failed instead of spinning.
const MAX_ACCEPTED_STEPS: usize = 1_000_000;

/// Rayleigh–Plesset right-hand side as a first-order system in
/// `(R, R_dot)`, forced by an ambient pressure history.
pub struct RayleighPlesset<'a, P: AmbientPressure> {
    pressure: &'a P,
    rho_kg_m3: f64,
    mu_pa_s: f64,
    sigma_n_m: f64,
    /// Constant internal gas pressure, pinned to p_vap.
    p_g_pa: f64,
}

impl<'a, P: AmbientPressure> RayleighPlesset<'a, P> {
    pub fn new(fluid: &FluidProperties, pressure: &'a P) -> Self {
        RayleighPlesset {
            pressure,
            rho_kg_m3: fluid.rho_kg_m3(),
            mu_pa_s: fluid.mu_pa_s(),
            sigma_n_m: fluid.sigma_n_m(),
            p_g_pa: fluid.p_vap_pa(),
        }
    }
}

impl<P: AmbientPressure> OdeSystem<2> for RayleighPlesset<'_, P> {
    fn rhs(&self, t: f64, y: &[f64; 2]) -> [f64; 2] {
        let (r, r_dot) = (y[0], y[1]);
        let p_inf = self.pressure.pressure_at(t);
        let term1 = (self.p_g_pa
            - p_inf
            - 2.0 * self.sigma_n_m / r
            - 4.0 * self.mu_pa_s * r_dot / r)
            / (self.rho_kg_m3 * r);
        let term2 = 1.5 * r_dot * r_dot / r;
        [r_dot, term1 - term2]
    }
}

/// One bubble-dynamics run over the spiral channel.
///
/// `bubble` and `solver` can be adjusted before calling `run`; the
/// run itself owns all of its state, so independent simulations can
/// be dispatched in parallel without synchronization.
pub struct BubbleSimulation<'a> {
    params: &'a SpiralParameters,
    fluid: &'a FluidProperties,
    pub bubble: BubbleConfig,
    pub solver: SolverConfig,
}

impl<'a> BubbleSimulation<'a> {
    pub fn new(params: &'a SpiralParameters, fluid: &'a FluidProperties) -> Self {
        BubbleSimulation {
            params,
            fluid,
            bubble: BubbleConfig::default(),
            solver: SolverConfig::default(),
        }
    }

    pub fn from_config(config: &'a ChannelConfig) -> Self {
        BubbleSimulation {
            params: &config.spiral,
            fluid: &config.fluid,
            bubble: config.bubble,
            solver: config.solver,
        }
    }

    /// Integrate under the Bernoulli spiral pressure field.
    pub fn run(&self) -> VoluteResult<SimulationResult> {
        let field = BernoulliSpiralPressure::new(self.params, self.fluid);
        self.run_with_pressure(&field)
    }

    /// Integrate under an arbitrary ambient pressure history.
    ///
    /// The seam for still-fluid baselines and prescribed-pressure
    /// studies; `run` is this with the spiral field plugged in.
    pub fn run_with_pressure<P: AmbientPressure>(
        &self,
        field: &P,
    ) -> VoluteResult<SimulationResult> {
        let start = Instant::now();
        let initial = self.validated_initial_state()?;
        let solver = self.validated_solver()?;
        let floor_m = solver.collapse_floor_fraction * initial.r_m;

        let system = RayleighPlesset::new(self.fluid, field);
        let mut stepper = DormandPrince45::new(
            &system,
            0.0,
            [initial.r_m, initial.r_dot_m_s],
            solver.t_max_s,
            solver.rel_tol,
            solver.abs_tol,
        )?;

        let t_eval = Array1::linspace(0.0, solver.t_max_s, solver.n_points);
        let mut trajectory = Trajectory::with_capacity(solver.n_points);
        trajectory.push(BubbleSample {
            t_s: 0.0,
            r_m: initial.r_m,
            r_dot_m_s: initial.r_dot_m_s,
        });
        let mut next = 1usize;

        let outcome = loop {
            if stepper.n_accepted() >= MAX_ACCEPTED_STEPS {
                break RunOutcome::Failed {
                    t_end_s: stepper.t(),
                    message: format!("no terminal state after {MAX_ACCEPTED_STEPS} steps"),
                };
            }
            match stepper.advance() {
                StepOutcome::Advanced(rec) => {
                    if rec.y1[0] < floor_m {
                        let t_cross = floor_crossing_time(&rec, floor_m);
                        while next < solver.n_points && t_eval[next] < t_cross {
                            let y = rec.interpolate(t_eval[next]);
                            if y[0] < floor_m {
                                break;
                            }
                            trajectory.push(BubbleSample {
                                t_s: t_eval[next],
                                r_m: y[0],
                                r_dot_m_s: y[1],
                            });
                            next += 1;
                        }
                        break RunOutcome::Collapsed { t_end_s: t_cross };
                    }
                    while next < solver.n_points && t_eval[next] <= rec.t1 {
                        let y = rec.interpolate(t_eval[next]);
                        trajectory.push(BubbleSample {
                            t_s: t_eval[next],
                            r_m: y[0],
                            r_dot_m_s: y[1],
                        });
                        next += 1;
                    }
                }
                StepOutcome::Finished => {
                    // Floating-point tail of the grid: fill from the
                    // final accepted state.
                    while next < solver.n_points {
                        trajectory.push(BubbleSample {
                            t_s: t_eval[next],
                            r_m: stepper.y()[0],
                            r_dot_m_s: stepper.y()[1],
                        });
                        next += 1;
                    }
                    break RunOutcome::Completed;
                }
                StepOutcome::Diverged { t_s, message } => {
                    break RunOutcome::Failed { t_end_s: t_s, message };
                }
            }
        };

        Ok(SimulationResult {
            trajectory,
            outcome,
            n_steps: stepper.n_accepted(),
            n_rejected: stepper.n_rejected(),
            solve_time_ms: start.elapsed().as_secs_f64() * 1e3,
        })
    }

    fn validated_initial_state(&self) -> VoluteResult<BubbleState> {
        let r_m = self.bubble.r_0_m;
        let r_dot_m_s = self.bubble.r_dot_0_m_s;
        if !r_m.is_finite() || r_m <= 0.0 {
            return Err(VoluteError::InvalidParameter(format!(
                "initial bubble radius must be finite and > 0, got {r_m}"
            )));
        }
        if !r_dot_m_s.is_finite() {
            return Err(VoluteError::InvalidParameter(format!(
                "initial wall velocity must be finite, got {r_dot_m_s}"
            )));
        }
        Ok(BubbleState { r_m, r_dot_m_s })
    }

    fn validated_solver(&self) -> VoluteResult<SolverConfig> {
        let s = self.solver;
        if !s.t_max_s.is_finite() || s.t_max_s <= 0.0 {
            return Err(VoluteError::ConfigError(format!(
                "t_max_s must be finite and > 0, got {}",
                s.t_max_s
            )));
        }
        if s.n_points < 2 {
            return Err(VoluteError::ConfigError(format!(
                "n_points must be >= 2, got {}",
                s.n_points
            )));
        }
        if !s.collapse_floor_fraction.is_finite()
            || s.collapse_floor_fraction <= 0.0
            || s.collapse_floor_fraction >= 1.0
        {
            return Err(VoluteError::ConfigError(format!(
                "collapse_floor_fraction must lie in (0, 1), got {}",
                s.collapse_floor_fraction
            )));
        }
        Ok(s)
    }
}

/// Linear estimate of the instant the radius crossed the floor within
/// one accepted step.
fn floor_crossing_time(rec: &StepRecord<2>, floor_m: f64) -> f64 {
    let dr = rec.y1[0] - rec.y0[0];
    if dr == 0.0 {
        return rec.t1;
    }
    rec.t0 + (floor_m - rec.y0[0]) / dr * (rec.t1 - rec.t0)
}
