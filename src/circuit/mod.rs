//! Circuit description and parameter mapping.
//!
//! A [`CircuitSpec`] holds raw component values as the user entered them.
//! [`map`] turns it into the normalized [`SimulationParameters`] the
//! response engine works with.

mod mapper;
mod types;

pub use mapper::{map, SimulationParameters};
pub use types::*;
