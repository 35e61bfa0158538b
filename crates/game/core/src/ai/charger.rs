use arrayvec::ArrayVec;

use crate::action::{Delta, MobDecision};
use crate::config::GameConfig;
use crate::state::{ActorState, Direction, EntityId};

use super::{Surroundings, hero_delta};

/// Path-blocking rule distinguishing the two charger kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum PathRule {
    /// Pure-x then pure-y paths; stops before props and lane edges.
    Straight,
    /// Direct diagonal first, then pure axes. Also refuses to stop on a cell
    /// beside the hero unless the next cell is the hero.
    Reaping,
}

#[derive(Clone, Copy, Debug, Default)]
struct Reach {
    delta: Delta,
    kill: Option<EntityId>,
}

impl Reach {
    fn steps(&self) -> u32 {
        self.delta.0.unsigned_abs().max(self.delta.1.unsigned_abs())
    }
}

/// Charger: casts capped straight-line paths toward the hero and takes the
/// longest. The first mob on a path is trampled and the cast ends on its cell.
pub(super) fn decide(mob: &ActorState, around: &Surroundings<'_>, rule: PathRule) -> MobDecision {
    let (full_dx, full_dy) = hero_delta(mob, around);
    let (sx, sy) = (full_dx.signum(), full_dy.signum());
    let range = around.charge_range;
    let cap = (
        sx * full_dx.abs().min(range),
        sy * full_dy.abs().min(range),
    );

    let mut paths: ArrayVec<Direction, { GameConfig::MAX_CANDIDATES }> = ArrayVec::new();
    if rule == PathRule::Reaping && sx != 0 && sy != 0 {
        paths.push(Direction::from_signs(sx, sy));
    }
    if sx != 0 {
        paths.push(Direction::from_signs(sx, 0));
    }
    if sy != 0 {
        paths.push(Direction::from_signs(0, sy));
    }
    if paths.is_empty() {
        return MobDecision::pass();
    }

    let mut best = Reach::default();
    for direction in paths {
        let reach = cast(mob, around, rule, direction, cap);
        if reach.steps() > best.steps() {
            best = reach;
        }
    }

    if best.delta == (full_dx, full_dy) {
        MobDecision::lunge(best.delta)
    } else if best.steps() > 0 {
        MobDecision::charge(best.delta, best.kill)
    } else {
        MobDecision::rotate(Direction::from_signs(sx, sy).facing().unwrap_or_default())
    }
}

fn cast(
    mob: &ActorState,
    around: &Surroundings<'_>,
    rule: PathRule,
    direction: Direction,
    cap: Delta,
) -> Reach {
    let (mut x, mut y) = (0, 0);
    let under_cap = |x: i32, y: i32| {
        (direction.dx == 0 || x.abs() < cap.0.abs()) && (direction.dy == 0 || y.abs() < cap.1.abs())
    };

    while under_cap(x, y) {
        let next = mob.position.offset(x + direction.dx, y + direction.dy);
        if !around.in_bounds(next) || around.prop_at(next) {
            break;
        }
        if rule == PathRule::Reaping
            && next.manhattan(around.hero) == 1
            && next.step(direction) != around.hero
        {
            break;
        }

        x += direction.dx;
        y += direction.dy;

        if let Some(victim) = around.mob_at(next) {
            return Reach {
                delta: (x, y),
                kill: Some(victim),
            };
        }
    }

    Reach {
        delta: (x, y),
        kill: None,
    }
}
