//! Response engine: dispatches to closed forms or numerical integration.

use serde::{Deserialize, Serialize};

use crate::circuit::{InitialConditions, SimulationParameters, SystemType};
use crate::error::Result;
use crate::expr::{self, InputSignal};

use super::analytic::{first_order_impulse, first_order_step, SecondOrderResponse};
use super::euler;
use super::grid::{round_time, TimeGrid, MAX_TIME_DECIMALS};
use super::{DEFAULT_CRITICAL_TOLERANCE, DEFAULT_TIME_DECIMALS};

/// Configuration for the response engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Half-width of the band around ζ = 1 treated as critically damped.
    pub critical_tolerance: f64,
    /// Decimal places kept in reported sample times.
    pub time_decimals: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            critical_tolerance: DEFAULT_CRITICAL_TOLERANCE,
            time_decimals: DEFAULT_TIME_DECIMALS,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the critical-damping band.
    ///
    /// - 0.0 (default): only ζ exactly equal to 1.0 is critical
    /// - 1e-9: absorbs rounding in computed ratios such as `R/2·√(C/L)`
    pub fn with_critical_tolerance(mut self, tolerance: f64) -> Self {
        self.critical_tolerance = tolerance.max(0.0);
        self
    }

    /// Set the number of decimals kept in sample times, at most
    /// [`MAX_TIME_DECIMALS`].
    pub fn with_time_decimals(mut self, decimals: u32) -> Self {
        self.time_decimals = decimals.min(MAX_TIME_DECIMALS);
        self
    }
}

/// The input applied at t = 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InputSpec {
    /// Step of the circuit's source amplitude
    Step,
    /// Impulse of the given area
    Impulse { amplitude: f64 },
    /// Arbitrary u(t) given as an expression in `t`
    Custom { expression: String },
}

impl InputSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Step => "step",
            Self::Impulse { .. } => "impulse",
            Self::Custom { .. } => "custom",
        }
    }
}

/// One point of a response: time in seconds, output in volts or amps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResponseSample {
    pub t: f64,
    pub y: f64,
}

/// Compute the response of a circuit to an input.
///
/// Step and impulse inputs are evaluated in closed form and cannot fail.
/// A custom input is parsed once and integrated with forward Euler; a parse
/// error or the first failing evaluation aborts the whole run.
pub fn respond(
    params: &SimulationParameters,
    initial: &InitialConditions,
    grid: &TimeGrid,
    input: &InputSpec,
    config: &EngineConfig,
) -> Result<Vec<ResponseSample>> {
    match input {
        InputSpec::Step => Ok(step_response(params, initial, grid, config)),
        InputSpec::Impulse { amplitude } => {
            Ok(impulse_response(params, *amplitude, grid, config))
        }
        InputSpec::Custom { expression } => {
            let signal = expr::parse(expression)?;
            respond_to_signal(params, initial, grid, &signal, config)
        }
    }
}

/// Integrate the circuit against an injected input signal.
pub fn respond_to_signal(
    params: &SimulationParameters,
    initial: &InitialConditions,
    grid: &TimeGrid,
    signal: &dyn InputSignal,
    config: &EngineConfig,
) -> Result<Vec<ResponseSample>> {
    let values = if params.system_type.is_second_order() {
        // Parallel RLC integrates the inductor current, series the capacitor voltage
        let y0 = match params.system_type {
            SystemType::SecondOrderParallelRlc => initial.inductor_current,
            _ => initial.capacitor_voltage,
        };
        euler::second_order(grid, params.omega_n(), params.zeta(), y0, signal)?
    } else {
        euler::first_order(grid, params.time_constant, first_order_seed(params, initial), signal)?
    };

    log::debug!(
        "integrated {} response: {} samples, dt = {}",
        params.system_type,
        values.len(),
        grid.dt()
    );

    Ok(collect(grid, config, values.into_iter()))
}

fn first_order_seed(params: &SimulationParameters, initial: &InitialConditions) -> f64 {
    match params.system_type {
        SystemType::FirstOrderRl => initial.inductor_current,
        _ => initial.capacitor_voltage,
    }
}

fn step_response(
    params: &SimulationParameters,
    initial: &InitialConditions,
    grid: &TimeGrid,
    config: &EngineConfig,
) -> Vec<ResponseSample> {
    let tau = params.time_constant;
    match params.system_type {
        SystemType::FirstOrderRc | SystemType::FirstOrderRl => {
            let y0 = first_order_seed(params, initial);
            // RL output is a current: the final value is V/R, not V
            let steady = if params.system_type == SystemType::FirstOrderRl {
                params.gain / params.resistance
            } else {
                params.gain
            };
            sample(grid, config, |t| first_order_step(y0, steady, tau, t))
        }
        SystemType::SecondOrderSeriesRlc => {
            let response = SecondOrderResponse::solve(
                params.omega_n(),
                params.zeta(),
                initial.capacitor_voltage,
                initial.inductor_current / params.capacitance,
                params.amplitude,
                config.critical_tolerance,
            );
            log::debug!("series RLC step response, {:?}", response.regime());
            sample(grid, config, |t| response.value_at(t))
        }
        SystemType::SecondOrderParallelRlc => {
            // Amplitude doubles as the step current; no initial inductor voltage
            let response = SecondOrderResponse::solve(
                params.omega_n(),
                params.zeta(),
                initial.inductor_current,
                0.0,
                params.amplitude,
                config.critical_tolerance,
            );
            log::debug!("parallel RLC step response, {:?}", response.regime());
            sample(grid, config, |t| response.value_at(t))
        }
    }
}

fn impulse_response(
    params: &SimulationParameters,
    amplitude: f64,
    grid: &TimeGrid,
    config: &EngineConfig,
) -> Vec<ResponseSample> {
    if params.system_type.is_second_order() {
        // Zero state kicked to an initial slope equal to the impulse area
        let response = SecondOrderResponse::solve(
            params.omega_n(),
            params.zeta(),
            0.0,
            amplitude,
            0.0,
            config.critical_tolerance,
        );
        log::debug!("{} impulse response, {:?}", params.system_type, response.regime());
        sample(grid, config, |t| response.value_at(t))
    } else {
        let tau = params.time_constant;
        sample(grid, config, |t| first_order_impulse(amplitude, tau, t))
    }
}

fn sample(grid: &TimeGrid, config: &EngineConfig, f: impl Fn(f64) -> f64) -> Vec<ResponseSample> {
    collect(grid, config, grid.times().map(f))
}

fn collect(
    grid: &TimeGrid,
    config: &EngineConfig,
    values: impl Iterator<Item = f64>,
) -> Vec<ResponseSample> {
    grid.times()
        .zip(values)
        .map(|(t, y)| ResponseSample {
            t: round_time(t, config.time_decimals),
            y,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{map, CircuitSpec};
    use crate::error::ResponseError;

    fn run(spec: CircuitSpec, initial: InitialConditions, input: InputSpec) -> Result<Vec<ResponseSample>> {
        let grid = TimeGrid::new(10.0, 0.05).unwrap();
        respond(&map(&spec), &initial, &grid, &input, &EngineConfig::default())
    }

    #[test]
    fn test_rl_step_settles_at_v_over_r() {
        let spec = CircuitSpec::new(SystemType::FirstOrderRl, 2.0, 1.0, 1.0, 4.0);
        let samples = run(spec, InitialConditions::default(), InputSpec::Step).unwrap();
        assert!((samples[200].y - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_rc_step_starts_at_initial_voltage() {
        let spec = CircuitSpec::default();
        let samples = run(spec, InitialConditions::new(3.0, 9.0), InputSpec::Step).unwrap();
        assert_eq!(samples[0].y, 3.0);
        assert_eq!(samples[0].t, 0.0);
    }

    #[test]
    fn test_series_step_uses_inductor_current_slope() {
        let spec = CircuitSpec::new(SystemType::SecondOrderSeriesRlc, 1.0, 1.0, 0.5, 1.0);
        let samples = run(spec, InitialConditions::new(0.0, 1.0), InputSpec::Step).unwrap();
        // dy0 = Il0 / C = 2
        let slope = (samples[1].y - samples[0].y) / 0.05;
        assert!((slope - 2.0).abs() < 0.2);
    }

    #[test]
    fn test_parallel_step_starts_flat() {
        let spec = CircuitSpec::new(SystemType::SecondOrderParallelRlc, 5.0, 1.0, 1.0, 2.0);
        let samples = run(spec, InitialConditions::new(7.0, 0.5), InputSpec::Step).unwrap();
        assert_eq!(samples[0].y, 0.5);
        assert!((samples[1].y - samples[0].y).abs() < 0.05);
    }

    #[test]
    fn test_second_order_impulse_starts_at_zero() {
        let spec = CircuitSpec::new(SystemType::SecondOrderSeriesRlc, 1.0, 1.0, 1.0, 1.0);
        let samples = run(spec, InitialConditions::new(5.0, 5.0), InputSpec::Impulse { amplitude: 2.0 }).unwrap();
        assert_eq!(samples[0].y, 0.0);
        assert!(samples[1].y > 0.0);
        assert!(samples[200].y.abs() < 0.05);
    }

    #[test]
    fn test_custom_parse_error_returns_no_samples() {
        let result = run(
            CircuitSpec::default(),
            InitialConditions::default(),
            InputSpec::Custom {
                expression: "sin(2*".to_string(),
            },
        );
        let err = result.unwrap_err();
        assert!(matches!(err, ResponseError::ParseError { .. }));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_custom_rl_seeds_with_inductor_current() {
        let spec = CircuitSpec::with_defaults(SystemType::FirstOrderRl);
        let samples = run(
            spec,
            InitialConditions::new(0.0, 2.0),
            InputSpec::Custom {
                expression: "0".to_string(),
            },
        )
        .unwrap();
        assert_eq!(samples[0].y, 2.0);
        assert!((samples[1].y - 2.0 * 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_time_decimals_are_configurable() {
        let grid = TimeGrid::new(0.01, 0.001).unwrap();
        let config = EngineConfig::new().with_time_decimals(3);
        let samples = respond(
            &map(&CircuitSpec::default()),
            &InitialConditions::default(),
            &grid,
            &InputSpec::Step,
            &config,
        )
        .unwrap();
        assert_eq!(samples.len(), 11);
        assert_eq!(samples[3].t, 0.003);
    }

    #[test]
    fn test_time_decimals_are_clamped() {
        let config = EngineConfig::new().with_time_decimals(u32::MAX);
        assert_eq!(config.time_decimals, MAX_TIME_DECIMALS);

        let grid = TimeGrid::new(1.0, 0.1).unwrap();
        let samples = respond(
            &map(&CircuitSpec::default()),
            &InitialConditions::default(),
            &grid,
            &InputSpec::Step,
            &config,
        )
        .unwrap();
        assert!(samples.iter().all(|s| s.t.is_finite()));
    }

    #[test]
    fn test_custom_second_order_seeds_from_the_output_quantity() {
        let initial = InitialConditions::new(0.7, -0.3);
        let dt = 0.05;
        for (system_type, y0) in [
            (SystemType::SecondOrderSeriesRlc, 0.7),
            (SystemType::SecondOrderParallelRlc, -0.3),
        ] {
            let params = map(&CircuitSpec::with_defaults(system_type));
            let samples = run(
                CircuitSpec::with_defaults(system_type),
                initial,
                InputSpec::Custom {
                    expression: "0".to_string(),
                },
            )
            .unwrap();
            assert_eq!(samples[0].y, y0, "{}", system_type);

            // Zero initial slope: the first step only sees the restoring force
            let omega_n = params.omega_n();
            let expected = y0 + dt * (dt * (omega_n * omega_n * (0.0 - y0)));
            assert!(
                (samples[1].y - expected).abs() < 1e-12,
                "{}: {} != {}",
                system_type,
                samples[1].y,
                expected
            );
        }
    }

    #[test]
    fn test_long_custom_expression_is_an_error() {
        let result = run(
            CircuitSpec::with_defaults(SystemType::SecondOrderSeriesRlc),
            InitialConditions::default(),
            InputSpec::Custom {
                expression: ["t"; 20_000].join("+"),
            },
        );
        assert!(matches!(result, Err(ResponseError::ParseError { .. })));
    }
}
