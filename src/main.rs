//! rlcsim - RC, RL and RLC response simulator
//!
//! Prints the time-domain response of a circuit as CSV or JSON.
//!
//! # Usage
//!
//! ```bash
//! rlcsim --system rlc-series -r 1 -l 1 -c 1 --input step --format json
//! rlcsim --system rc --input custom --expr "t < 2 ? 1 : 0" > response.csv
//! ```

use std::io;
use std::process::ExitCode;

use clap::Parser;
use rlc_response::{
    analysis,
    circuit::{CircuitSpec, InitialConditions, Preset, SystemType},
    error::Result,
    output::{self, OutputFormat, ResponseOutput},
    EngineConfig, InputSpec, SimulationConfig, TimeGrid, DEFAULT_DT, DEFAULT_T_MAX,
};

/// Time-domain response of RC, RL and RLC circuits
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Circuit topology: rc, rl, rlc-series or rlc-parallel
    #[arg(short, long, default_value = "rc")]
    system: SystemType,

    /// Resistance in ohms
    #[arg(short = 'r', long, default_value_t = 1.0)]
    resistance: f64,

    /// Inductance in henries
    #[arg(short = 'l', long, default_value_t = 1.0)]
    inductance: f64,

    /// Capacitance in farads
    #[arg(short = 'c', long, default_value_t = 1.0)]
    capacitance: f64,

    /// Source amplitude (step current for rlc-parallel)
    #[arg(short = 'v', long, default_value_t = 1.0, allow_hyphen_values = true)]
    amplitude: f64,

    /// Initial capacitor voltage
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    vc0: f64,

    /// Initial inductor current
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    il0: f64,

    /// Damping preset for RLC circuits (underdamped, critical, overdamped)
    #[arg(long)]
    preset: Option<Preset>,

    /// Input type: step, impulse or custom
    #[arg(short, long, default_value = "step")]
    input: String,

    /// Impulse area
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    impulse_amp: f64,

    /// Custom input expression in t
    #[arg(short, long, default_value = "sin(2*t)")]
    expr: String,

    /// Simulated time in seconds
    #[arg(long, default_value_t = DEFAULT_T_MAX)]
    t_max: f64,

    /// Step size in seconds
    #[arg(long, default_value_t = DEFAULT_DT)]
    dt: f64,

    /// Treat |ζ - 1| <= tolerance as critically damped
    #[arg(long, default_value_t = 0.0)]
    critical_tolerance: f64,

    /// Output format: csv or json
    #[arg(short, long, default_value = "csv")]
    format: OutputFormat,

    /// Print the scenario summary and markers to stderr
    #[arg(long)]
    summary: bool,
}

impl Args {
    fn input_spec(&self) -> Result<InputSpec> {
        match self.input.to_ascii_lowercase().as_str() {
            "step" => Ok(InputSpec::Step),
            "impulse" => Ok(InputSpec::Impulse {
                amplitude: self.impulse_amp,
            }),
            "custom" => Ok(InputSpec::Custom {
                expression: self.expr.clone(),
            }),
            _ => Err(rlc_response::ResponseError::UnknownInputKind {
                name: self.input.clone(),
            }),
        }
    }

    fn simulation(&self) -> Result<SimulationConfig> {
        let mut circuit = CircuitSpec::new(
            self.system,
            self.resistance,
            self.inductance,
            self.capacitance,
            self.amplitude,
        );
        if let Some(preset) = self.preset {
            circuit = circuit.with_preset(preset);
        }

        let grid = TimeGrid::new(self.t_max, self.dt)?;
        let engine = EngineConfig::new().with_critical_tolerance(self.critical_tolerance);

        Ok(
            SimulationConfig::new(circuit, InitialConditions::new(self.vc0, self.il0), grid)
                .with_input(self.input_spec()?)
                .with_engine(engine),
        )
    }
}

fn run(args: &Args) -> Result<bool> {
    let simulation = args.simulation()?;
    log::info!("simulating {}", simulation.summary());

    let result = simulation.run();

    if args.summary {
        eprintln!("{}", simulation.summary());
        if let Ok(samples) = &result {
            let params = simulation.parameters();
            for marker in analysis::markers(&params, &simulation.grid, samples) {
                match marker.y {
                    Some(y) => eprintln!("{}: t = {:.4} s, y = {:.4}", marker.kind.label(), marker.t, y),
                    None => eprintln!("{}: t = {:.4} s", marker.kind.label(), marker.t),
                }
            }
        }
    }

    let mut stdout = io::stdout().lock();
    match args.format {
        OutputFormat::Json => {
            let response = ResponseOutput::from(result);
            output::write_json(&mut stdout, &response)?;
            Ok(!response.is_error())
        }
        OutputFormat::Csv => {
            let samples = result?;
            output::write_csv(&mut stdout, args.system.output_label(), &samples)?;
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
