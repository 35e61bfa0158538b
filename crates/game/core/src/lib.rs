//! Deterministic rules for the endless crypt corridor.
//!
//! `game-core` defines the canonical simulation (entities, occupancy, mob AI,
//! turn scheduling and the streaming generator) and exposes pure APIs that
//! the runtime hosts. All state mutation flows through [`engine::GameEngine`];
//! presentation layers only consume the [`VisualRequest`]s it queues and
//! report their completion.
pub mod action;
pub mod ai;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod generator;
pub mod grid;
pub mod state;

pub use action::{
    Continuation, Delta, MobAction, MobDecision, TransitionId, VisualKind, VisualRequest,
};
pub use config::{DifficultyTier, GameConfig, GenerationConfig, SpawnWindow};
pub use engine::{GameEngine, HeroAction, IntentError};
pub use env::{Env, GameEnv, PcgRng, RngOracle, compute_seed};
pub use error::{ErrorSeverity, GameError};
pub use grid::{Occupant, is_occupied, occupant_at};
pub use state::{
    ActorKind, ActorState, Direction, EntitiesState, EntityId, GameState, MobKind, Observables,
    Position, ProgressState, PropKind, PropState, TurnPhase, TurnState, WorldWindow,
};
