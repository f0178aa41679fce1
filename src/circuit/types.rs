//! Core types for circuit description.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ResponseError;

/// The four supported circuit topologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemType {
    /// First-order RC, output is the capacitor voltage
    FirstOrderRc,
    /// First-order RL, output is the inductor current
    FirstOrderRl,
    /// Series RLC, output is the capacitor voltage
    SecondOrderSeriesRlc,
    /// Parallel RLC, output is the inductor current
    SecondOrderParallelRlc,
}

impl SystemType {
    /// All system types, in selector order.
    pub const ALL: [SystemType; 4] = [
        Self::FirstOrderRc,
        Self::FirstOrderRl,
        Self::SecondOrderSeriesRlc,
        Self::SecondOrderParallelRlc,
    ];

    /// Short name used on the command line and in summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstOrderRc => "rc",
            Self::FirstOrderRl => "rl",
            Self::SecondOrderSeriesRlc => "rlc-series",
            Self::SecondOrderParallelRlc => "rlc-parallel",
        }
    }

    /// Check if this is an RLC (second-order) topology.
    pub fn is_second_order(&self) -> bool {
        matches!(
            self,
            Self::SecondOrderSeriesRlc | Self::SecondOrderParallelRlc
        )
    }

    /// Check if the output is a current (amps) rather than a voltage.
    pub fn outputs_current(&self) -> bool {
        matches!(self, Self::FirstOrderRl | Self::SecondOrderParallelRlc)
    }

    /// Axis label for the output quantity, e.g. `vC(t) (V)`.
    pub fn output_label(&self) -> &'static str {
        if self.outputs_current() {
            "iL(t) (A)"
        } else {
            "vC(t) (V)"
        }
    }
}

impl fmt::Display for SystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SystemType {
    type Err = ResponseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rc" | "first-order" | "firstorder" => Ok(Self::FirstOrderRc),
            "rl" => Ok(Self::FirstOrderRl),
            "rlc-series" | "rlcseries" | "series" => Ok(Self::SecondOrderSeriesRlc),
            "rlc-parallel" | "rlcparallel" | "parallel" => Ok(Self::SecondOrderParallelRlc),
            _ => Err(ResponseError::UnknownSystemType {
                name: s.to_string(),
            }),
        }
    }
}

/// Raw physical description of a circuit.
///
/// Values are taken as given: the caller guarantees `R`, `L` and `C` are
/// non-zero. Zero denominators make the derived time constant or damping
/// ratio infinite or NaN, and those values flow through to the samples.
///
/// For [`SystemType::SecondOrderParallelRlc`] the `amplitude` field is read
/// as a current amplitude (amps) rather than a voltage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircuitSpec {
    pub system_type: SystemType,
    /// Resistance in ohms
    pub resistance: f64,
    /// Inductance in henries
    pub inductance: f64,
    /// Capacitance in farads
    pub capacitance: f64,
    /// Source (step) amplitude
    pub amplitude: f64,
}

impl CircuitSpec {
    /// Create a circuit description.
    pub fn new(
        system_type: SystemType,
        resistance: f64,
        inductance: f64,
        capacitance: f64,
        amplitude: f64,
    ) -> Self {
        Self {
            system_type,
            resistance,
            inductance,
            capacitance,
            amplitude,
        }
    }

    /// Default (reset) values for the given topology: every component and
    /// the amplitude set to 1.
    pub fn with_defaults(system_type: SystemType) -> Self {
        Self::new(system_type, 1.0, 1.0, 1.0, 1.0)
    }

    /// Apply a damping preset, keeping the amplitude.
    ///
    /// Presets only exist for RLC topologies; first-order circuits are
    /// returned unchanged.
    pub fn with_preset(self, preset: Preset) -> Self {
        match preset.resistance(self.system_type) {
            Some(resistance) => Self {
                resistance,
                inductance: 1.0,
                capacitance: 1.0,
                ..self
            },
            None => self,
        }
    }
}

impl Default for CircuitSpec {
    fn default() -> Self {
        Self::with_defaults(SystemType::FirstOrderRc)
    }
}

/// Energy stored in the reactive elements at t = 0.
///
/// Both values are always present; each topology reads the one it needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InitialConditions {
    /// Capacitor voltage Vc(0) in volts
    pub capacitor_voltage: f64,
    /// Inductor current Il(0) in amps
    pub inductor_current: f64,
}

impl InitialConditions {
    pub fn new(capacitor_voltage: f64, inductor_current: f64) -> Self {
        Self {
            capacitor_voltage,
            inductor_current,
        }
    }
}

/// Damping presets for RLC circuits (L = C = 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// ζ < 1
    Underdamped,
    /// ζ = 1
    CriticallyDamped,
    /// ζ > 1
    Overdamped,
}

impl Preset {
    /// Resistance that yields this regime with L = C = 1.
    ///
    /// Series and parallel damping scale inversely with R, so the two
    /// topologies use different values.
    pub fn resistance(&self, system_type: SystemType) -> Option<f64> {
        match (system_type, self) {
            (SystemType::SecondOrderSeriesRlc, Self::Underdamped) => Some(1.0),
            (SystemType::SecondOrderSeriesRlc, Self::CriticallyDamped) => Some(2.0),
            (SystemType::SecondOrderSeriesRlc, Self::Overdamped) => Some(4.0),
            (SystemType::SecondOrderParallelRlc, Self::Underdamped) => Some(5.0),
            (SystemType::SecondOrderParallelRlc, Self::CriticallyDamped) => Some(0.5),
            (SystemType::SecondOrderParallelRlc, Self::Overdamped) => Some(0.2),
            _ => None,
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "underdamped" | "under" => Ok(Self::Underdamped),
            "critical" | "critically-damped" => Ok(Self::CriticallyDamped),
            "overdamped" | "over" => Ok(Self::Overdamped),
            _ => Err(format!("unknown preset '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_type_names() {
        for ty in SystemType::ALL {
            assert_eq!(ty.as_str().parse::<SystemType>().unwrap(), ty);
        }
        assert!("rlc".parse::<SystemType>().is_err());
    }

    #[test]
    fn test_output_labels() {
        assert_eq!(SystemType::FirstOrderRc.output_label(), "vC(t) (V)");
        assert_eq!(SystemType::FirstOrderRl.output_label(), "iL(t) (A)");
        assert_eq!(SystemType::SecondOrderParallelRlc.output_label(), "iL(t) (A)");
    }

    #[test]
    fn test_preset_applies_to_rlc_only() {
        let series = CircuitSpec::new(SystemType::SecondOrderSeriesRlc, 9.0, 3.0, 2.0, 5.0)
            .with_preset(Preset::Overdamped);
        assert_eq!(series.resistance, 4.0);
        assert_eq!(series.inductance, 1.0);
        assert_eq!(series.capacitance, 1.0);
        assert_eq!(series.amplitude, 5.0);

        let rc = CircuitSpec::default().with_preset(Preset::Underdamped);
        assert_eq!(rc, CircuitSpec::default());
    }
}
