//! # RLC Response
//!
//! Time-domain response of simple linear circuits.
//!
//! This library provides:
//! - Parameter mapping from R, L, C and source amplitude to τ, ζ and ωₙ
//! - Closed-form step and impulse responses for RC, RL, series RLC and
//!   parallel RLC circuits, in all three damping regimes
//! - Forward-Euler integration against an arbitrary input u(t) given as an
//!   expression in `t`
//!
//! ## Architecture
//!
//! - [`circuit`] - Circuit description and the parameter mapper
//! - [`solver`] - Time grid, closed forms, Euler integration and dispatch
//! - [`expr`] - Expression parser/evaluator for custom inputs
//! - [`analysis`] - Characteristic markers (τ, peak time)
//! - [`output`] - CSV and JSON result writers
//!
//! ## Usage
//!
//! ```
//! use rlc_response::circuit::{map, CircuitSpec, InitialConditions, SystemType};
//! use rlc_response::{respond, EngineConfig, InputSpec, TimeGrid};
//!
//! let spec = CircuitSpec::new(SystemType::SecondOrderSeriesRlc, 1.0, 1.0, 1.0, 1.0);
//! let grid = TimeGrid::new(10.0, 0.05).unwrap();
//! let samples = respond(
//!     &map(&spec),
//!     &InitialConditions::default(),
//!     &grid,
//!     &InputSpec::Step,
//!     &EngineConfig::default(),
//! )
//! .unwrap();
//! assert_eq!(samples.len(), 201);
//! ```
//!
//! ### Native CLI
//!
//! ```bash
//! rlcsim --system rlc-parallel --preset underdamped --format json
//! ```
//!
//! ## Known gaps
//!
//! Component values are not validated. A zero R, L or C yields infinite or
//! NaN parameters and those values appear in the samples. The critically
//! damped closed form is selected only when ζ is exactly 1.0 unless
//! [`EngineConfig::with_critical_tolerance`] widens the band.

pub mod analysis;
pub mod circuit;
pub mod config;
pub mod error;
pub mod expr;
pub mod output;
pub mod solver;

// Re-export main types for convenience
pub use config::SimulationConfig;
pub use error::{ResponseError, Result};
pub use solver::{respond, respond_to_signal, EngineConfig, InputSpec, ResponseSample, TimeGrid};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmCircuitSim;

/// Default simulated time in seconds
pub const DEFAULT_T_MAX: f64 = 10.0;

/// Default step size in seconds
pub const DEFAULT_DT: f64 = 0.05;
