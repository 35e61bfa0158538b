//! Event types for different topics.

use game_core::{Direction, IntentError, MobKind, TurnPhase, VisualRequest};
use serde::{Deserialize, Serialize};

/// A visual transition the simulation is waiting on.
///
/// `session` identifies the reset epoch the request belongs to; completions
/// must echo it back so stale ones from a previous session are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualEvent {
    pub session: u64,
    pub request: VisualRequest,
}

/// Events related to turn management.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// The active side changed, or a whole mobs round resolved within one
    /// command.
    PhaseChanged { phase: TurnPhase, round: u64 },

    /// A hero intent was refused; state is unchanged.
    IntentRejected {
        direction: Direction,
        error: IntentError,
    },
}

/// Events related to the session lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A fresh session replaced the previous one.
    Started { session: u64, seed: u64 },

    /// The corridor window moved forward.
    WindowAdvanced {
        min_boundary: i32,
        max_boundary: i32,
        score: i32,
    },

    HeroDied {
        killed_by: Option<MobKind>,
        score: i32,
    },
}
