//! Per-kind mob decision logic.
//!
//! Every mob kind maps to one pure function from [`Surroundings`] to a
//! [`MobDecision`]. Nothing here mutates state; the engine's resolver applies
//! the decision afterwards.
mod charger;
mod floater;
mod walker;

use crate::action::{Delta, MobDecision};
use crate::config::GameConfig;
use crate::grid;
use crate::state::{ActorState, EntityId, GameState, MobKind, Position, PropState};

/// Read-only view of the corridor a mob decides against.
#[derive(Clone, Copy, Debug)]
pub struct Surroundings<'a> {
    pub hero: Position,
    pub mobs: &'a [ActorState],
    pub props: &'a [PropState],
    pub lane_min: i32,
    pub lane_max: i32,
    pub min_boundary: i32,
    pub charge_range: i32,
}

impl<'a> Surroundings<'a> {
    pub fn of(state: &'a GameState, config: &GameConfig) -> Self {
        Self {
            hero: state.hero.position,
            mobs: &state.entities.mobs,
            props: &state.entities.props,
            lane_min: config.lane_min,
            lane_max: config.lane_max,
            min_boundary: state.window.min_boundary,
            charge_range: config.charge_range,
        }
    }

    /// Lane range and trailing edge.
    #[inline]
    pub fn in_bounds(&self, position: Position) -> bool {
        (self.lane_min..=self.lane_max).contains(&position.x) && position.y >= self.min_boundary
    }

    /// A mob or prop holds the cell. The hero is not an obstacle here.
    #[inline]
    pub fn blocked(&self, position: Position) -> bool {
        self.prop_at(position) || self.mob_at(position).is_some()
    }

    #[inline]
    pub fn prop_at(&self, position: Position) -> bool {
        grid::prop_at(self.props, position).is_some()
    }

    #[inline]
    pub fn mob_at(&self, position: Position) -> Option<EntityId> {
        grid::mob_at(self.mobs, position).map(|mob| mob.id)
    }
}

/// Decides one mob's action for the current round.
pub fn decide(mob: &ActorState, around: &Surroundings<'_>) -> MobDecision {
    let Some(kind) = mob.mob_kind() else {
        return MobDecision::pass();
    };

    if mob.position == around.hero {
        tracing::warn!(
            target: "game_core::ai",
            mob = %mob.id,
            position = %mob.position,
            "mob shares the hero's cell; passing"
        );
        return MobDecision::pass();
    }

    match kind {
        MobKind::Walker => walker::decide(mob, around),
        MobKind::Floater => floater::decide(mob, around),
        MobKind::ChargerA => charger::decide(mob, around, charger::PathRule::Straight),
        MobKind::ChargerB => charger::decide(mob, around, charger::PathRule::Reaping),
    }
}

/// Vector from the mob to the hero.
#[inline]
fn hero_delta(mob: &ActorState, around: &Surroundings<'_>) -> Delta {
    mob.position.delta_to(around.hero)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::state::{Direction, PropKind};

    /// Owns entity lists so tests can borrow a [`Surroundings`].
    pub struct Corridor {
        pub hero: Position,
        pub mobs: Vec<ActorState>,
        pub props: Vec<PropState>,
        pub min_boundary: i32,
        next_id: u32,
    }

    impl Corridor {
        pub fn new(hero: Position) -> Self {
            Self {
                hero,
                mobs: Vec::new(),
                props: Vec::new(),
                min_boundary: 0,
                next_id: 1,
            }
        }

        pub fn mob(&mut self, kind: MobKind, at: Position, facing: Direction) -> ActorState {
            let mob = ActorState::mob(EntityId(self.next_id), kind, at).with_facing(facing);
            self.next_id += 1;
            self.mobs.push(mob.clone());
            mob
        }

        pub fn prop(&mut self, at: Position) {
            let id = EntityId(self.next_id);
            self.next_id += 1;
            self.props
                .push(PropState::new(id, at, Direction::SOUTH, PropKind::Stones));
        }

        pub fn around(&self) -> Surroundings<'_> {
            let config = GameConfig::default();
            Surroundings {
                hero: self.hero,
                mobs: &self.mobs,
                props: &self.props,
                lane_min: config.lane_min,
                lane_max: config.lane_max,
                min_boundary: self.min_boundary,
                charge_range: config.charge_range,
            }
        }
    }
}
