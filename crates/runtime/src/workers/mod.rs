//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker executes gameplay commands, while the visual worker
//! plays the transitions the simulation waits on.

mod simulation;
mod visual;

pub use simulation::{Command, SimulationWorker};
pub use visual::VisualWorker;
