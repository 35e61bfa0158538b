/// Which side may act. Exactly one phase holds at rest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TurnPhase {
    /// Hero input is accepted (initial state).
    #[default]
    HeroTurn,
    /// Mobs are resolving; hero input is gated.
    MobsTurn,
}

/// Turn bookkeeping for the hero/mobs alternation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub phase: TurnPhase,

    /// Mob actions of the current round whose completion is still awaited.
    pub pending: u32,

    /// Identifier of the current (or last) mobs round. Completions carry the
    /// round they belong to so late arrivals from an aborted round are ignored.
    pub round: u64,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_hero_turn(&self) -> bool {
        self.phase == TurnPhase::HeroTurn
    }

    #[inline]
    pub fn is_mobs_turn(&self) -> bool {
        self.phase == TurnPhase::MobsTurn
    }
}
