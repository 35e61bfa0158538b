//! Occupancy queries over the positioned entities of a session.
//!
//! All lookups are linear scans. Dead mobs occupy nothing; a cell targeted by
//! an in-flight move counts as occupied by the mover.
use crate::state::{ActorState, EntityId, GameState, Position, PropState};

/// What currently holds a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Occupant {
    Hero,
    Mob(EntityId),
    Prop(EntityId),
}

/// Alive mob claiming `position`.
pub fn mob_at(mobs: &[ActorState], position: Position) -> Option<&ActorState> {
    mobs.iter().find(|mob| mob.claims(position))
}

pub fn prop_at(props: &[PropState], position: Position) -> Option<&PropState> {
    props.iter().find(|prop| prop.position == position)
}

/// Finds whatever occupies `position`: hero first, then props, then mobs.
pub fn occupant_at(state: &GameState, position: Position) -> Option<Occupant> {
    if state.hero.claims(position) {
        return Some(Occupant::Hero);
    }
    if let Some(prop) = prop_at(&state.entities.props, position) {
        return Some(Occupant::Prop(prop.id));
    }
    mob_at(&state.entities.mobs, position).map(|mob| Occupant::Mob(mob.id))
}

pub fn is_occupied(state: &GameState, position: Position) -> bool {
    occupant_at(state, position).is_some()
}
