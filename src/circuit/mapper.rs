//! Parameter mapping from component values to normalized parameters.

use serde::Serialize;

use super::types::{CircuitSpec, SystemType};

/// Normalized view of a circuit consumed by the response engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationParameters {
    pub system_type: SystemType,
    /// Steady-state scaling (V for first-order, 1 for RLC)
    pub gain: f64,
    /// τ in seconds (RC, L/R, or 1/ωₙ)
    pub time_constant: f64,
    /// ζ, second-order only
    pub damping: Option<f64>,
    /// ωₙ in rad/s, second-order only
    pub natural_frequency: Option<f64>,
    /// Source amplitude, the step target for RLC circuits
    pub amplitude: f64,
    /// R, needed to turn the RL step amplitude into a current
    pub resistance: f64,
    /// C, needed for the series RLC initial slope Il(0)/C
    pub capacitance: f64,
}

impl SimulationParameters {
    /// Natural frequency, falling back to 1/τ.
    pub fn omega_n(&self) -> f64 {
        self.natural_frequency.unwrap_or(1.0 / self.time_constant)
    }

    /// Damping ratio, 0 when not defined for the topology.
    pub fn zeta(&self) -> f64 {
        self.damping.unwrap_or(0.0)
    }

    /// Damped oscillation frequency ωd = ωₙ√(1-ζ²), if underdamped.
    pub fn damped_frequency(&self) -> Option<f64> {
        let zeta = self.damping?;
        if zeta < 1.0 {
            Some(self.omega_n() * (1.0 - zeta * zeta).sqrt())
        } else {
            None
        }
    }

    /// Check that every derived value is finite.
    pub fn is_finite(&self) -> bool {
        self.gain.is_finite()
            && self.time_constant.is_finite()
            && self.damping.map_or(true, f64::is_finite)
            && self.natural_frequency.map_or(true, f64::is_finite)
    }
}

/// Map raw component values to simulation parameters.
///
/// This never fails. `R`, `L` and `C` must be non-zero; a zero makes τ, ζ or
/// ωₙ infinite or NaN, which is logged and then propagated unchanged.
pub fn map(spec: &CircuitSpec) -> SimulationParameters {
    let CircuitSpec {
        system_type,
        resistance: r,
        inductance: l,
        capacitance: c,
        amplitude: v,
    } = *spec;

    let params = match system_type {
        SystemType::FirstOrderRc => SimulationParameters {
            system_type,
            gain: v,
            time_constant: r * c,
            damping: None,
            natural_frequency: None,
            amplitude: v,
            resistance: r,
            capacitance: c,
        },
        SystemType::FirstOrderRl => SimulationParameters {
            system_type,
            gain: v,
            time_constant: l / r,
            damping: None,
            natural_frequency: None,
            amplitude: v,
            resistance: r,
            capacitance: c,
        },
        SystemType::SecondOrderSeriesRlc | SystemType::SecondOrderParallelRlc => {
            let wn = 1.0 / (l * c).sqrt();
            // Series and parallel damping are reciprocal in R; do not swap them.
            let zeta = if system_type == SystemType::SecondOrderSeriesRlc {
                r / 2.0 * (c / l).sqrt()
            } else {
                1.0 / (2.0 * r) * (l / c).sqrt()
            };
            SimulationParameters {
                system_type,
                gain: 1.0,
                time_constant: 1.0 / wn,
                damping: Some(zeta),
                natural_frequency: Some(wn),
                amplitude: v,
                resistance: r,
                capacitance: c,
            }
        }
    };

    if !params.is_finite() {
        log::warn!(
            "degenerate {} circuit (R={}, L={}, C={}): derived parameters are not finite",
            system_type,
            r,
            l,
            c
        );
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_first_order_time_constants() {
        let rc = map(&CircuitSpec::new(SystemType::FirstOrderRc, 2.0, 7.0, 0.5, 3.0));
        assert!(close(rc.time_constant, 1.0));
        assert!(close(rc.gain, 3.0));
        assert_eq!(rc.damping, None);

        let rl = map(&CircuitSpec::new(SystemType::FirstOrderRl, 4.0, 2.0, 7.0, 3.0));
        assert!(close(rl.time_constant, 0.5));
        assert!(close(rl.gain, 3.0));
    }

    #[test]
    fn test_series_and_parallel_damping_differ() {
        let series = map(&CircuitSpec::new(SystemType::SecondOrderSeriesRlc, 1.0, 1.0, 1.0, 1.0));
        assert!(close(series.zeta(), 0.5));
        assert!(close(series.omega_n(), 1.0));
        assert!(close(series.gain, 1.0));

        let parallel = map(&CircuitSpec::new(SystemType::SecondOrderParallelRlc, 1.0, 1.0, 1.0, 1.0));
        assert!(close(parallel.zeta(), 0.5));

        let series = map(&CircuitSpec::new(SystemType::SecondOrderSeriesRlc, 4.0, 1.0, 4.0, 1.0));
        let parallel = map(&CircuitSpec::new(SystemType::SecondOrderParallelRlc, 4.0, 1.0, 4.0, 1.0));
        // R/2·√(C/L) = 4 vs 1/(2R)·√(L/C) = 1/16
        assert!(close(series.zeta(), 4.0));
        assert!(close(parallel.zeta(), 0.0625));
        assert!(close(series.omega_n(), 0.5));
        assert!(close(series.time_constant, 2.0));
    }

    #[test]
    fn test_presets_hit_their_regimes() {
        use super::super::Preset;
        for ty in [SystemType::SecondOrderSeriesRlc, SystemType::SecondOrderParallelRlc] {
            let base = CircuitSpec::with_defaults(ty);
            assert!(map(&base.with_preset(Preset::Underdamped)).zeta() < 1.0);
            assert_eq!(map(&base.with_preset(Preset::CriticallyDamped)).zeta(), 1.0);
            assert!(map(&base.with_preset(Preset::Overdamped)).zeta() > 1.0);
        }
    }

    #[test]
    fn test_degenerate_values_propagate() {
        let params = map(&CircuitSpec::new(SystemType::FirstOrderRl, 0.0, 1.0, 1.0, 1.0));
        assert!(params.time_constant.is_infinite());
        assert!(!params.is_finite());
    }

    #[test]
    fn test_map_is_deterministic() {
        let spec = CircuitSpec::new(SystemType::SecondOrderParallelRlc, 0.37, 2.2, 0.01, 1.5);
        let a = map(&spec);
        let b = map(&spec);
        assert_eq!(a.time_constant.to_bits(), b.time_constant.to_bits());
        assert_eq!(a.zeta().to_bits(), b.zeta().to_bits());
        assert_eq!(a, b);
    }
}
