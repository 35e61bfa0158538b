//! Error types for rejected intents.

use crate::error::{ErrorSeverity, GameError};
use crate::grid::Occupant;
use crate::state::{EntityId, Position};

/// Reasons the resolver refuses a move or attack. A rejected intent never
/// changes state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntentError {
    #[error("hero input arrived during the mobs turn")]
    NotHeroTurn,

    #[error("hero is dead")]
    HeroDead,

    #[error("actor {actor} is busy")]
    Busy { actor: EntityId },

    #[error("actor {actor} was asked to move by a zero delta")]
    ZeroDelta { actor: EntityId },

    #[error("target {target} is outside the lanes")]
    OutOfLanes { target: Position },

    #[error("target {target} is behind the trailing edge {min_boundary}")]
    BehindBoundary { target: Position, min_boundary: i32 },

    #[error("target {target} is occupied by {occupant:?}")]
    Blocked { target: Position, occupant: Occupant },

    #[error("actor {actor} not found")]
    UnknownActor { actor: EntityId },
}

impl IntentError {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotHeroTurn => "not_hero_turn",
            Self::HeroDead => "hero_dead",
            Self::Busy { .. } => "busy",
            Self::ZeroDelta { .. } => "zero_delta",
            Self::OutOfLanes { .. } => "out_of_lanes",
            Self::BehindBoundary { .. } => "behind_boundary",
            Self::Blocked { .. } => "blocked",
            Self::UnknownActor { .. } => "unknown_actor",
        }
    }
}

impl GameError for IntentError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotHeroTurn | Self::Busy { .. } => ErrorSeverity::Recoverable,
            Self::HeroDead
            | Self::ZeroDelta { .. }
            | Self::OutOfLanes { .. }
            | Self::BehindBoundary { .. }
            | Self::Blocked { .. } => ErrorSeverity::Validation,
            Self::UnknownActor { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        self.as_str()
    }
}
