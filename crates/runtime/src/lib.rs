//! Runtime orchestration for the crypt simulation.
//!
//! This crate hosts a [`game_core::GameEngine`] session on a background
//! worker, turns every queued visual transition into an event, and feeds
//! completions back to the engine. Consumers embed [`Runtime`] and talk to it
//! through the cloneable [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{InstantDriver, PacedDriver, Result, RuntimeError, RuntimeHandle, VisualDriver};
pub use events::{Event, EventBus, SessionEvent, Topic, TurnEvent, VisualEvent};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
