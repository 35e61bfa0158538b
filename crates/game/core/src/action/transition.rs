use std::fmt;

use crate::state::{ActorKind, Direction, EntityId, Position};

/// Identifier of one visual transition. Never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionId(pub u64);

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// What the presentation layer should animate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisualKind {
    Move { from: Position, to: Position },
    Attack { facing: Direction },
    /// `from` is the direction the killing blow came from.
    Death { from: Direction },
}

impl VisualKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            VisualKind::Move { .. } => "move",
            VisualKind::Attack { .. } => "attack",
            VisualKind::Death { .. } => "death",
        }
    }
}

/// A transition handed to the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisualRequest {
    pub id: TransitionId,
    pub actor: EntityId,
    pub actor_kind: ActorKind,
    pub kind: VisualKind,
}

/// Work resumed when a transition completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Continuation {
    /// Nothing follows (gestures, the hero's own death).
    Nothing,
    /// The hero finished moving: progress, window advance, then the mobs round.
    HeroMoved,
    /// The hero finished a strike: the victim starts dying.
    HeroStruck { victim: EntityId },
    /// A mob finished dying and leaves the corridor. When `ends_hero_turn`,
    /// the mobs round starts afterwards.
    MobFell { ends_hero_turn: bool },
    /// A mob finished its action for `round`.
    MobActed { round: u64, hits_hero: bool },
}

/// Bookkeeping for a transition still in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingTransition {
    pub request: VisualRequest,
    /// Clears the actor's `busy` flag on completion.
    pub gating: bool,
    pub then: Continuation,
}
