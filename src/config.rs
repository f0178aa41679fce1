//! A complete simulation scenario.

use std::fmt;

use crate::circuit::{map, CircuitSpec, InitialConditions, SimulationParameters};
use crate::error::Result;
use crate::solver::{respond, EngineConfig, InputSpec, ResponseSample, TimeGrid};

/// Everything needed to compute one response.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub circuit: CircuitSpec,
    pub initial: InitialConditions,
    pub grid: TimeGrid,
    pub input: InputSpec,
    pub engine: EngineConfig,
}

impl SimulationConfig {
    /// Create a scenario with a step input and the default engine settings.
    pub fn new(circuit: CircuitSpec, initial: InitialConditions, grid: TimeGrid) -> Self {
        Self {
            circuit,
            initial,
            grid,
            input: InputSpec::Step,
            engine: EngineConfig::default(),
        }
    }

    /// Set the input.
    pub fn with_input(mut self, input: InputSpec) -> Self {
        self.input = input;
        self
    }

    /// Set the engine configuration.
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Normalized parameters of the circuit.
    pub fn parameters(&self) -> SimulationParameters {
        map(&self.circuit)
    }

    /// Map the circuit and compute its response.
    pub fn run(&self) -> Result<Vec<ResponseSample>> {
        respond(
            &self.parameters(),
            &self.initial,
            &self.grid,
            &self.input,
            &self.engine,
        )
    }

    /// One-line description of the scenario, suitable for sharing.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SimulationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.circuit;
        write!(
            f,
            "R = {} Ω, L = {} H, C = {} F, V = {} V, Vc(0) = {} V, Il(0) = {} A, tmax = {} s, type = {}, input = {}",
            c.resistance,
            c.inductance,
            c.capacitance,
            c.amplitude,
            self.initial.capacitor_voltage,
            self.initial.inductor_current,
            self.grid.t_max(),
            c.system_type,
            self.input.kind(),
        )?;
        match &self.input {
            InputSpec::Impulse { amplitude } => write!(f, " ({})", amplitude),
            InputSpec::Custom { expression } => write!(f, " ({})", expression),
            InputSpec::Step => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::SystemType;

    #[test]
    fn test_summary_lists_all_values() {
        let config = SimulationConfig::new(
            CircuitSpec::new(SystemType::SecondOrderSeriesRlc, 2.0, 1.0, 0.5, 3.0),
            InitialConditions::new(1.0, -1.0),
            TimeGrid::new(10.0, 0.05).unwrap(),
        );
        assert_eq!(
            config.summary(),
            "R = 2 Ω, L = 1 H, C = 0.5 F, V = 3 V, Vc(0) = 1 V, Il(0) = -1 A, tmax = 10 s, type = rlc-series, input = step"
        );

        let config = config.with_input(InputSpec::Custom {
            expression: "sin(t)".to_string(),
        });
        assert!(config.summary().ends_with("input = custom (sin(t))"));
    }

    #[test]
    fn test_run_is_idempotent() {
        let config = SimulationConfig::new(
            CircuitSpec::with_defaults(SystemType::SecondOrderParallelRlc),
            InitialConditions::new(0.0, 0.3),
            TimeGrid::new(5.0, 0.01).unwrap(),
        )
        .with_input(InputSpec::Custom {
            expression: "t < 1 ? 1 : 0".to_string(),
        });
        assert_eq!(config.run().unwrap(), config.run().unwrap());
    }
}
