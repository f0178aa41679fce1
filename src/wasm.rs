//! WASM bindings for the response engine.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCircuitSim } from 'rlc_response';
//!
//! await init();
//!
//! const sim = new WasmCircuitSim('rlc-series', 1, 1, 1, 1);
//! sim.set_initial_conditions(0, 0);
//! const data = JSON.parse(sim.step_response(10, 0.05));
//! if (data.error) { showError(data.error); } else { plot(data); }
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::{CircuitSpec, InitialConditions, SystemType};
use crate::output::ResponseOutput;
use crate::solver::{EngineConfig, InputSpec, TimeGrid};
use crate::SimulationConfig;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// JavaScript-facing handle on one circuit.
///
/// Every response method returns the JSON text of either
/// `[{t, y}, ...]` or `{error}`.
#[wasm_bindgen]
pub struct WasmCircuitSim {
    circuit: CircuitSpec,
    initial: InitialConditions,
    engine: EngineConfig,
}

#[wasm_bindgen]
impl WasmCircuitSim {
    /// Create a simulator for `rc`, `rl`, `rlc-series` or `rlc-parallel`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        system_type: &str,
        resistance: f64,
        inductance: f64,
        capacitance: f64,
        amplitude: f64,
    ) -> Result<WasmCircuitSim, JsValue> {
        let system_type: SystemType = system_type
            .parse()
            .map_err(|e: crate::ResponseError| JsValue::from_str(&e.to_string()))?;
        Ok(WasmCircuitSim {
            circuit: CircuitSpec::new(system_type, resistance, inductance, capacitance, amplitude),
            initial: InitialConditions::default(),
            engine: EngineConfig::default(),
        })
    }

    /// Set Vc(0) and Il(0).
    #[wasm_bindgen]
    pub fn set_initial_conditions(&mut self, capacitor_voltage: f64, inductor_current: f64) {
        self.initial = InitialConditions::new(capacitor_voltage, inductor_current);
    }

    /// Widen the band around ζ = 1 treated as critically damped.
    #[wasm_bindgen]
    pub fn set_critical_tolerance(&mut self, tolerance: f64) {
        self.engine = self.engine.with_critical_tolerance(tolerance);
    }

    #[wasm_bindgen]
    pub fn step_response(&self, t_max: f64, dt: f64) -> String {
        self.respond(t_max, dt, InputSpec::Step)
    }

    #[wasm_bindgen]
    pub fn impulse_response(&self, t_max: f64, dt: f64, amplitude: f64) -> String {
        self.respond(t_max, dt, InputSpec::Impulse { amplitude })
    }

    #[wasm_bindgen]
    pub fn custom_response(&self, t_max: f64, dt: f64, expression: &str) -> String {
        self.respond(
            t_max,
            dt,
            InputSpec::Custom {
                expression: expression.to_string(),
            },
        )
    }

    /// Shareable one-line description of the circuit.
    #[wasm_bindgen]
    pub fn summary(&self, t_max: f64, dt: f64) -> Result<String, JsValue> {
        let grid = TimeGrid::new(t_max, dt).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(SimulationConfig::new(self.circuit, self.initial, grid).summary())
    }
}

impl WasmCircuitSim {
    fn respond(&self, t_max: f64, dt: f64, input: InputSpec) -> String {
        let result = TimeGrid::new(t_max, dt).and_then(|grid| {
            SimulationConfig::new(self.circuit, self.initial, grid)
                .with_input(input)
                .with_engine(self.engine)
                .run()
        });
        ResponseOutput::from(result)
            .to_json()
            .unwrap_or_else(|e| format!("{{\"error\":{:?}}}", e.to_string()))
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
