use arrayvec::ArrayVec;

use crate::action::{Delta, MobDecision};
use crate::config::GameConfig;
use crate::state::{ActorState, Direction};

use super::{Surroundings, hero_delta};

/// Floater: drifts diagonally toward the hero.
///
/// Up to three diagonal candidates are cast cell by cell, each bounded by
/// per-axis limits. The farthest cast wins; ties keep preference order.
pub(super) fn decide(mob: &ActorState, around: &Surroundings<'_>) -> MobDecision {
    let (dx, dy) = hero_delta(mob, around);
    let (sx, sy) = (dx.signum(), dy.signum());

    let mut candidates: ArrayVec<Direction, { GameConfig::MAX_CANDIDATES }> = ArrayVec::new();
    // Aligned with the hero: the cross axis may stray one cell less than the
    // main axis, so the diagonal never overshoots the hero's row or column.
    let (limit_x, limit_y) = match (sx, sy) {
        (0, 0) => return MobDecision::pass(),
        (_, 0) => {
            candidates.push(Direction::from_signs(sx, 1));
            candidates.push(Direction::from_signs(sx, -1));
            (dx, dx - sx)
        }
        (0, _) => {
            candidates.push(Direction::from_signs(1, sy));
            candidates.push(Direction::from_signs(-1, sy));
            (dy - sy, dy)
        }
        _ => {
            candidates.push(Direction::from_signs(sx, sy));
            candidates.push(Direction::from_signs(sx, -sy));
            candidates.push(Direction::from_signs(-sx, sy));
            (dx, dy)
        }
    };

    let mut best: Delta = (0, 0);
    for direction in candidates {
        let reach = cast(mob, around, direction, limit_x, limit_y);
        if reach.0.abs() > best.0.abs() {
            best = reach;
        }
    }

    if best == (dx, dy) {
        MobDecision::lunge(best)
    } else if best.0 != 0 {
        MobDecision::step(best)
    } else {
        MobDecision::rotate(Direction::from_signs(sx, sy).facing().unwrap_or_default())
    }
}

/// Walks diagonally while both axes stay under their limits, stopping before
/// the first out-of-bounds or occupied cell.
fn cast(
    mob: &ActorState,
    around: &Surroundings<'_>,
    direction: Direction,
    limit_x: i32,
    limit_y: i32,
) -> Delta {
    let (mut x, mut y): (i32, i32) = (0, 0);
    while x.abs() < limit_x.abs() && y.abs() < limit_y.abs() {
        let next = mob.position.offset(x + direction.dx, y + direction.dy);
        if !around.in_bounds(next) || around.blocked(next) {
            break;
        }
        x += direction.dx;
        y += direction.dy;
    }
    (x, y)
}
