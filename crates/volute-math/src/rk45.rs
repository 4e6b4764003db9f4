//! Adaptive Dormand–Prince 5(4) integration.
//!
//! Embedded explicit Runge–Kutta pair with FSAL, step-size control on an
//! RMS error norm, and cubic-Hermite dense output between accepted steps.
//! The stepper reports divergence (non-finite stages, step-size underflow)
//! as an outcome instead of panicking, so drivers can preserve partial
//! trajectories.

use volute_types::error::{VoluteError, VoluteResult};

/// First-order ODE system `y' = f(t, y)` with `N` state components.
pub trait OdeSystem<const N: usize> {
    fn rhs(&self, t: f64, y: &[f64; N]) -> [f64; N];
}

/// Nodes c_i of the Dormand–Prince tableau.
const C: [f64; 7] = [0.0, 0.2, 0.3, 0.8, 8.0 / 9.0, 1.0, 1.0];

/// Stage coefficients a_ij (row-padded; row 6 doubles as the 5th-order
/// weights, which is what makes the scheme FSAL).
const A: [[f64; 6]; 7] = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.2, 0.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0, 0.0],
    [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0, 0.0],
    [
        19372.0 / 6561.0,
        -25360.0 / 2187.0,
        64448.0 / 6561.0,
        -212.0 / 729.0,
        0.0,
        0.0,
    ],
    [
        9017.0 / 3168.0,
        -355.0 / 33.0,
        46732.0 / 5247.0,
        49.0 / 176.0,
        -5103.0 / 18656.0,
        0.0,
    ],
    [
        35.0 / 384.0,
        0.0,
        500.0 / 1113.0,
        125.0 / 192.0,
        -2187.0 / 6784.0,
        11.0 / 84.0,
    ],
];

/// Error weights b_i − b*_i (5th-order minus embedded 4th-order).
const E: [f64; 7] = [
    71.0 / 57600.0,
    0.0,
    -71.0 / 16695.0,
    71.0 / 1920.0,
    -17253.0 / 339200.0,
    22.0 / 525.0,
    -1.0 / 40.0,
];

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 5.0;

/// Absolute floor below which a shrinking step is treated as divergence.
const MIN_STEP: f64 = 1e-300;

/// One accepted step with endpoint derivatives for dense output.
#[derive(Debug, Clone, Copy)]
pub struct StepRecord<const N: usize> {
    pub t0: f64,
    pub y0: [f64; N],
    pub f0: [f64; N],
    pub t1: f64,
    pub y1: [f64; N],
    pub f1: [f64; N],
}

impl<const N: usize> StepRecord<N> {
    /// Cubic-Hermite interpolation at `t` in `[t0, t1]`.
    /// Exact at both endpoints.
    pub fn interpolate(&self, t: f64) -> [f64; N] {
        let h = self.t1 - self.t0;
        let s = (t - self.t0) / h;
        let one_m = 1.0 - s;
        let h00 = (1.0 + 2.0 * s) * one_m * one_m;
        let h10 = s * one_m * one_m;
        let h01 = s * s * (3.0 - 2.0 * s);
        let h11 = s * s * (s - 1.0);

        let mut out = [0.0; N];
        for i in 0..N {
            out[i] =
                h00 * self.y0[i] + h * h10 * self.f0[i] + h01 * self.y1[i] + h * h11 * self.f1[i];
        }
        out
    }
}

/// Result of one `advance` call.
#[derive(Debug, Clone)]
pub enum StepOutcome<const N: usize> {
    /// One step accepted; the record spans exactly that step.
    Advanced(StepRecord<N>),
    /// The integration span is exhausted.
    Finished,
    /// Non-finite values or step-size underflow; the stepper state holds
    /// the last accepted point.
    Diverged { t_s: f64, message: String },
}

/// Adaptive Dormand–Prince 5(4) stepper over `[t0, t_end]`.
pub struct DormandPrince45<'a, S: OdeSystem<N>, const N: usize> {
    system: &'a S,
    t: f64,
    y: [f64; N],
    f: [f64; N],
    t_end: f64,
    h: f64,
    rel_tol: f64,
    abs_tol: f64,
    n_accepted: usize,
    n_rejected: usize,
}

impl<'a, S: OdeSystem<N>, const N: usize> DormandPrince45<'a, S, N> {
    pub fn new(
        system: &'a S,
        t0: f64,
        y0: [f64; N],
        t_end: f64,
        rel_tol: f64,
        abs_tol: f64,
    ) -> VoluteResult<Self> {
        if !rel_tol.is_finite() || rel_tol <= 0.0 || !abs_tol.is_finite() || abs_tol <= 0.0 {
            return Err(VoluteError::ConfigError(format!(
                "tolerances must be finite and > 0, got rel_tol={rel_tol}, abs_tol={abs_tol}"
            )));
        }
        if !t0.is_finite() || !t_end.is_finite() || t_end <= t0 {
            return Err(VoluteError::ConfigError(format!(
                "integration span must satisfy t_end > t0, got [{t0}, {t_end}]"
            )));
        }
        if y0.iter().any(|v| !v.is_finite()) {
            return Err(VoluteError::InvalidParameter(
                "initial state must be finite".into(),
            ));
        }

        let f0 = system.rhs(t0, &y0);
        if f0.iter().any(|v| !v.is_finite()) {
            return Err(VoluteError::IntegrationDiverged {
                t_s: t0,
                message: "right-hand side is non-finite at the initial state".into(),
            });
        }

        let h = initial_step(system, t0, &y0, &f0, t_end, rel_tol, abs_tol);
        Ok(DormandPrince45 {
            system,
            t: t0,
            y: y0,
            f: f0,
            t_end,
            h,
            rel_tol,
            abs_tol,
            n_accepted: 0,
            n_rejected: 0,
        })
    }

    /// Current integration time.
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Last accepted state.
    pub fn y(&self) -> &[f64; N] {
        &self.y
    }

    pub fn n_accepted(&self) -> usize {
        self.n_accepted
    }

    pub fn n_rejected(&self) -> usize {
        self.n_rejected
    }

    /// Take one accepted step, shrinking the trial step as needed.
    pub fn advance(&mut self) -> StepOutcome<N> {
        if self.t >= self.t_end {
            return StepOutcome::Finished;
        }

        loop {
            let h = self.h.min(self.t_end - self.t);

            let mut k = [[0.0_f64; N]; 7];
            k[0] = self.f;
            let mut y_stage = self.y;
            let mut finite = true;
            for s in 1..7 {
                for i in 0..N {
                    let mut acc = 0.0;
                    for j in 0..s {
                        acc += A[s][j] * k[j][i];
                    }
                    y_stage[i] = self.y[i] + h * acc;
                }
                k[s] = self.system.rhs(self.t + C[s] * h, &y_stage);
                if k[s].iter().any(|v| !v.is_finite()) {
                    finite = false;
                    break;
                }
            }

            if !finite {
                self.n_rejected += 1;
                self.h = h * 0.5;
                if self.step_underflow() {
                    return StepOutcome::Diverged {
                        t_s: self.t,
                        message: "non-finite derivative, step size underflow".into(),
                    };
                }
                continue;
            }

            // The 7th stage state is the 5th-order solution (FSAL).
            let y_new = y_stage;

            let mut err_sq = 0.0;
            for i in 0..N {
                let mut e = 0.0;
                for j in 0..7 {
                    e += E[j] * k[j][i];
                }
                e *= h;
                let scale = self.abs_tol + self.rel_tol * self.y[i].abs().max(y_new[i].abs());
                err_sq += (e / scale) * (e / scale);
            }
            let err = (err_sq / N as f64).sqrt();

            if !err.is_finite() {
                self.n_rejected += 1;
                self.h = h * 0.5;
                if self.step_underflow() {
                    return StepOutcome::Diverged {
                        t_s: self.t,
                        message: "non-finite error estimate, step size underflow".into(),
                    };
                }
                continue;
            }

            if err <= 1.0 {
                let record = StepRecord {
                    t0: self.t,
                    y0: self.y,
                    f0: self.f,
                    t1: self.t + h,
                    y1: y_new,
                    f1: k[6],
                };
                self.t += h;
                self.y = y_new;
                self.f = k[6];
                self.n_accepted += 1;

                if self.y.iter().any(|v| !v.is_finite()) {
                    return StepOutcome::Diverged {
                        t_s: self.t,
                        message: "non-finite state after accepted step".into(),
                    };
                }

                let factor = if err > 0.0 {
                    (SAFETY * err.powf(-0.2)).clamp(MIN_FACTOR, MAX_FACTOR)
                } else {
                    MAX_FACTOR
                };
                self.h = h * factor;
                return StepOutcome::Advanced(record);
            }

            self.n_rejected += 1;
            self.h = h * (SAFETY * err.powf(-0.2)).max(MIN_FACTOR);
            if self.step_underflow() {
                return StepOutcome::Diverged {
                    t_s: self.t,
                    message: format!("step size underflow (h={})", self.h),
                };
            }
        }
    }

    fn step_underflow(&self) -> bool {
        self.h < MIN_STEP || self.h < f64::EPSILON * self.t.abs()
    }
}

/// Hairer-style starting step: balance the state scale against the
/// first and (finite-difference) second derivative scales.
fn initial_step<S: OdeSystem<N>, const N: usize>(
    system: &S,
    t0: f64,
    y0: &[f64; N],
    f0: &[f64; N],
    t_end: f64,
    rel_tol: f64,
    abs_tol: f64,
) -> f64 {
    let mut scale = [0.0_f64; N];
    for i in 0..N {
        scale[i] = abs_tol + rel_tol * y0[i].abs();
    }

    let d0 = rms_scaled(y0, &scale);
    let d1 = rms_scaled(f0, &scale);
    let h0 = if d0 < 1e-5 || d1 < 1e-5 {
        1e-6
    } else {
        0.01 * d0 / d1
    };

    let mut y1 = [0.0_f64; N];
    for i in 0..N {
        y1[i] = y0[i] + h0 * f0[i];
    }
    let f1 = system.rhs(t0 + h0, &y1);
    let mut df = [0.0_f64; N];
    for i in 0..N {
        df[i] = f1[i] - f0[i];
    }
    let d2 = rms_scaled(&df, &scale) / h0;

    let d_max = d1.max(d2);
    let h1 = if d_max <= 1e-15 {
        (h0 * 1e-3).max(1e-6)
    } else {
        (0.01 / d_max).powf(0.2)
    };

    let h = (100.0 * h0).min(h1).min(t_end - t0);
    if h.is_finite() && h > 0.0 {
        h
    } else {
        (t_end - t0) * 1e-6
    }
}

fn rms_scaled<const N: usize>(v: &[f64; N], scale: &[f64; N]) -> f64 {
    let mut acc = 0.0;
    for i in 0..N {
        let r = v[i] / scale[i];
        acc += r * r;
    }
    (acc / N as f64).sqrt()
}
