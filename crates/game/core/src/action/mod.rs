//! Actor actions and the visual transitions they produce.
//!
//! Mob AI returns a [`MobDecision`]; the engine's resolver turns it into one
//! or more [`VisualRequest`]s, each of which must be completed exactly once
//! by the presentation layer.
mod transition;

pub use transition::{Continuation, PendingTransition, TransitionId, VisualKind, VisualRequest};

use crate::state::{Direction, EntityId};

/// Multi-cell movement vector.
pub type Delta = (i32, i32);

/// One mob's action for the current round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MobAction {
    /// Do nothing.
    Pass,
    /// Turn in place, then pass.
    Rotate { facing: Direction },
    /// Move by `delta` without touching the hero.
    Step { delta: Delta },
    /// Melee strike along `facing`.
    Attack { facing: Direction },
    /// Attack gesture followed by a move that ends on the hero's cell.
    Lunge { delta: Delta },
    /// Straight-line charge, killing the struck mob (if any) first.
    Charge { delta: Delta, kill: Option<EntityId> },
}

/// AI output: the action plus whether it threatens the hero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MobDecision {
    pub action: MobAction,
    pub hits_hero: bool,
}

impl MobDecision {
    pub const fn pass() -> Self {
        Self {
            action: MobAction::Pass,
            hits_hero: false,
        }
    }

    pub const fn rotate(facing: Direction) -> Self {
        Self {
            action: MobAction::Rotate { facing },
            hits_hero: false,
        }
    }

    pub const fn step(delta: Delta) -> Self {
        Self {
            action: MobAction::Step { delta },
            hits_hero: false,
        }
    }

    pub const fn attack(facing: Direction) -> Self {
        Self {
            action: MobAction::Attack { facing },
            hits_hero: true,
        }
    }

    pub const fn lunge(delta: Delta) -> Self {
        Self {
            action: MobAction::Lunge { delta },
            hits_hero: true,
        }
    }

    pub const fn charge(delta: Delta, kill: Option<EntityId>) -> Self {
        Self {
            action: MobAction::Charge { delta, kill },
            hits_hero: false,
        }
    }}
