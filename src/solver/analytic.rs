//! Closed-form step and impulse responses.
//!
//! First-order responses are single exponentials. Second-order responses
//! are solved from `y(0)`, `y'(0)` and the steady state in one of three
//! damping regimes; the coefficients are computed once and then evaluated
//! at every grid point.

use serde::Serialize;

/// Damping regime of a second-order system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DampingRegime {
    /// ζ < 1, decaying oscillation
    Underdamped,
    /// ζ = 1, fastest non-oscillatory return
    CriticallyDamped,
    /// ζ > 1, sum of two real exponentials
    Overdamped,
}

impl DampingRegime {
    /// Classify a damping ratio.
    ///
    /// With `tolerance == 0.0` the critical branch is taken only when ζ is
    /// exactly 1.0, so computed ratios such as `0.1 * 10.0` land in one of
    /// the other regimes. A positive tolerance treats `|ζ - 1| <= tolerance`
    /// as critical.
    pub fn classify(zeta: f64, tolerance: f64) -> Self {
        if (zeta - 1.0).abs() <= tolerance {
            Self::CriticallyDamped
        } else if zeta < 1.0 {
            Self::Underdamped
        } else {
            Self::Overdamped
        }
    }
}

/// First-order step response `y0·e^{-t/τ} + k·(1 - e^{-t/τ})`.
pub fn first_order_step(y0: f64, steady: f64, time_constant: f64, t: f64) -> f64 {
    let decay = (-t / time_constant).exp();
    y0 * decay + steady * (1.0 - decay)
}

/// First-order impulse response `(A/τ)·e^{-t/τ}`.
///
/// Stored initial energy is ignored.
pub fn first_order_impulse(amplitude: f64, time_constant: f64, t: f64) -> f64 {
    (amplitude / time_constant) * (-t / time_constant).exp()
}

/// Solved second-order trajectory in one damping regime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SecondOrderResponse {
    /// `steady + e^{-σt}(A·cos(ωd·t) + B·sin(ωd·t))`
    Underdamped {
        steady: f64,
        sigma: f64,
        omega_d: f64,
        a: f64,
        b: f64,
    },
    /// `steady + (A + B·t)e^{-ωₙt}`
    CriticallyDamped {
        steady: f64,
        omega_n: f64,
        a: f64,
        b: f64,
    },
    /// `steady + C1·e^{s1·t} + C2·e^{s2·t}`
    Overdamped {
        steady: f64,
        s1: f64,
        s2: f64,
        c1: f64,
        c2: f64,
    },
}

impl SecondOrderResponse {
    /// Solve for the trajectory matching `y(0) = y0`, `y'(0) = dy0` and
    /// settling at `steady`.
    pub fn solve(
        omega_n: f64,
        zeta: f64,
        y0: f64,
        dy0: f64,
        steady: f64,
        critical_tolerance: f64,
    ) -> Self {
        match DampingRegime::classify(zeta, critical_tolerance) {
            DampingRegime::Underdamped => {
                let omega_d = omega_n * (1.0 - zeta * zeta).sqrt();
                let sigma = zeta * omega_n;
                let a = y0 - steady;
                // y'(0) = -σA + ωd·B
                let b = (dy0 + sigma * a) / omega_d;
                Self::Underdamped {
                    steady,
                    sigma,
                    omega_d,
                    a,
                    b,
                }
            }
            DampingRegime::CriticallyDamped => {
                let a = y0 - steady;
                // y'(0) = B - ωₙA
                Self::CriticallyDamped {
                    steady,
                    omega_n,
                    a,
                    b: dy0 + omega_n * a,
                }
            }
            DampingRegime::Overdamped => {
                let root = (zeta * zeta - 1.0).sqrt();
                let s1 = -omega_n * (zeta - root);
                let s2 = -omega_n * (zeta + root);
                let denom = s1 - s2;
                let offset = y0 - steady;
                Self::Overdamped {
                    steady,
                    s1,
                    s2,
                    c1: (dy0 - offset * s2) / denom,
                    c2: (offset * s1 - dy0) / denom,
                }
            }
        }
    }

    pub fn regime(&self) -> DampingRegime {
        match self {
            Self::Underdamped { .. } => DampingRegime::Underdamped,
            Self::CriticallyDamped { .. } => DampingRegime::CriticallyDamped,
            Self::Overdamped { .. } => DampingRegime::Overdamped,
        }
    }

    /// Evaluate the trajectory at time `t`.
    pub fn value_at(&self, t: f64) -> f64 {
        match *self {
            Self::Underdamped {
                steady,
                sigma,
                omega_d,
                a,
                b,
            } => steady + (-sigma * t).exp() * (a * (omega_d * t).cos() + b * (omega_d * t).sin()),
            Self::CriticallyDamped {
                steady,
                omega_n,
                a,
                b,
            } => steady + (a + b * t) * (-omega_n * t).exp(),
            Self::Overdamped {
                steady,
                s1,
                s2,
                c1,
                c2,
            } => steady + c1 * (s1 * t).exp() + c2 * (s2 * t).exp(),
        }
    }
}
