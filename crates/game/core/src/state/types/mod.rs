pub mod common;
pub mod entities;
pub mod turn;
pub mod world;

// Re-export common types
pub use common::{Direction, EntityId, Position};

// Re-export entity collection, actor and prop types
pub use entities::{ActorKind, ActorState, EntitiesState, MobKind, PropKind, PropState};

// Re-export turn state
pub use turn::{TurnPhase, TurnState};

// Re-export world types
pub use world::{ProgressState, WorldWindow};
