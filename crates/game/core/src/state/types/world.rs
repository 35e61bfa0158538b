use std::time::Duration;

use strum::EnumCount;

use super::MobKind;

/// Retained/generation range along the corridor. Both edges only move forward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldWindow {
    /// Trailing edge: nothing below this y is retained or enterable.
    pub min_boundary: i32,
    /// Near edge of the most recently generated window.
    pub max_boundary: i32,
}

impl WorldWindow {
    pub const fn new(min_boundary: i32, max_boundary: i32) -> Self {
        Self {
            min_boundary,
            max_boundary,
        }
    }
}

/// Session-level progress: score, difficulty inputs and generation history.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressState {
    /// Max hero y ever reached minus the start offset. Never decreases.
    pub score: i32,

    /// Session clock, frozen once the hero dies.
    pub elapsed: Duration,

    /// Number of `extend` calls so far; part of every generation seed.
    pub generations: u64,

    /// Kinds that already appeared this session (indexed by [`MobKind::index`]).
    pub introduced: [bool; MobKind::COUNT],

    /// The mob that landed the killing blow.
    pub last_killed_by: Option<MobKind>,
}

impl ProgressState {
    pub fn is_introduced(&self, kind: MobKind) -> bool {
        self.introduced[kind.index()]
    }

    pub fn mark_introduced(&mut self, kind: MobKind) {
        self.introduced[kind.index()] = true;
    }
}
