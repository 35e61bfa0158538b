use crate::action::MobDecision;
use crate::state::{ActorState, Direction};

use super::{Surroundings, hero_delta};

/// Walker: steps along its facing while the hero is ahead, otherwise turns
/// toward the hero one axis at a time (rows first) and strikes when adjacent.
pub(super) fn decide(mob: &ActorState, around: &Surroundings<'_>) -> MobDecision {
    let (dx, dy) = hero_delta(mob, around);
    let facing = mob.facing;
    let distance = dx.unsigned_abs() + dy.unsigned_abs();

    let ahead = (dy != 0 && dy.signum() == facing.dy) || (dx != 0 && dx.signum() == facing.dx);
    if distance > 1 && ahead {
        let next = mob.position.step(facing);
        if around.in_bounds(next) && !around.blocked(next) {
            return MobDecision::step((facing.dx, facing.dy));
        }
    }

    if dy != 0 && dy.signum() != facing.dy {
        MobDecision::rotate(Direction::from_signs(0, dy))
    } else if dx != 0 && dx.signum() != facing.dx {
        MobDecision::rotate(Direction::from_signs(dx, 0))
    } else if distance == 1 {
        MobDecision::attack(facing)
    } else {
        MobDecision::pass()
    }
}
