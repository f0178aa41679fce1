//! Response engine.
//!
//! Turns normalized [`SimulationParameters`](crate::circuit::SimulationParameters)
//! into a sampled trajectory.
//!
//! ## Analytical branch
//!
//! Step and impulse inputs have closed forms. First-order circuits decay
//! exponentially towards their final value; second-order circuits follow
//! one of three damping regimes:
//!
//! ```text
//! ζ < 1   y = y∞ + e^{-ζωₙt}(A·cos ωd·t + B·sin ωd·t)
//! ζ = 1   y = y∞ + (A + B·t)e^{-ωₙt}
//! ζ > 1   y = y∞ + C1·e^{s1·t} + C2·e^{s2·t}
//! ```
//!
//! ## Numerical branch
//!
//! A custom input u(t) is integrated with fixed-step forward Euler on the
//! sampling grid itself.

mod analytic;
mod engine;
mod euler;
mod grid;

pub use analytic::{first_order_impulse, first_order_step, DampingRegime, SecondOrderResponse};
pub use engine::{respond, respond_to_signal, EngineConfig, InputSpec, ResponseSample};
pub use grid::{round_time, TimeGrid};

/// Default half-width of the critical-damping band (exact comparison).
pub const DEFAULT_CRITICAL_TOLERANCE: f64 = 0.0;

/// Default number of decimals kept in sample times.
pub const DEFAULT_TIME_DECIMALS: u32 = 2;
