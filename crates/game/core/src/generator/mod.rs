//! Streaming content generator.
//!
//! Content is created in windows ahead of the hero and retired once it falls
//! behind the trailing edge. Every random draw is derived from the session
//! seed, the generation counter and a per-call draw index, so a seed replays
//! the same corridor.
pub mod difficulty;

use std::time::Duration;

use crate::config::SpawnWindow;
use crate::env::{GameEnv, RngOracle, RollContext, compute_seed};
use crate::grid;
use crate::state::{Direction, EntityId, GameState, Position, PropKind};

/// What one `extend` call placed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpawnReport {
    pub mobs: Vec<EntityId>,
    pub props: Vec<EntityId>,
}

/// Sequential draws for one generation.
struct Draws<'a> {
    rng: &'a dyn RngOracle,
    game_seed: u64,
    generation: u64,
    next: u32,
}

impl<'a> Draws<'a> {
    fn new(rng: &'a dyn RngOracle, game_seed: u64, generation: u64) -> Self {
        Self {
            rng,
            game_seed,
            generation,
            next: 0,
        }
    }

    fn seed(&mut self, context: RollContext) -> u64 {
        let seed = compute_seed(self.game_seed, self.generation, self.next, context as u32);
        self.next += 1;
        seed
    }

    fn below(&mut self, bound: u32, context: RollContext) -> u32 {
        let seed = self.seed(context);
        self.rng.below(seed, bound)
    }

    fn unit(&mut self, context: RollContext) -> f64 {
        let seed = self.seed(context);
        self.rng.unit(seed)
    }

    /// Removes and returns a uniformly chosen cell.
    fn take_cell(&mut self, free: &mut Vec<Position>) -> Option<Position> {
        if free.is_empty() {
            return None;
        }
        let index = self.below(free.len() as u32, RollContext::Cell) as usize;
        Some(free.swap_remove(index))
    }
}

/// Populates `window` with mobs and props on cells that are free right now.
///
/// Mob count is uniform in `[min_mobs, min_mobs + variance)`; the first slot
/// goes to the strongest kind that just became eligible and has not appeared
/// yet. Placement stops early once the window has no free cell left.
pub fn extend(
    state: &mut GameState,
    env: GameEnv<'_>,
    window: SpawnWindow,
    elapsed: Duration,
) -> SpawnReport {
    let config = env.config();
    let generation = state.progress.generations;
    state.progress.generations += 1;

    let mut draws = Draws::new(env.rng(), state.game_seed, generation);
    let current: &GameState = state;
    let mut free: Vec<Position> = (window.near..window.near + window.wideness)
        .flat_map(|y| (config.lane_min..=config.lane_max).map(move |x| Position::new(x, y)))
        .filter(|&cell| !grid::is_occupied(current, cell))
        .collect();

    let mut report = SpawnReport::default();

    let mob_count = window.min_mobs + draws.below(window.variance, RollContext::MobCount);
    let mut forced = difficulty::forced(&config.generation, &state.progress, window.near);
    for _ in 0..mob_count {
        let Some(cell) = draws.take_cell(&mut free) else {
            break;
        };
        let kind = match forced.take() {
            Some(kind) => kind,
            None => difficulty::pick(
                &config.generation,
                window.near,
                elapsed,
                draws.unit(RollContext::Kind),
            ),
        };
        state.progress.mark_introduced(kind);
        report
            .mobs
            .push(state.add_mob(kind, cell, Direction::SOUTH));
    }

    let scaled = f64::from(window.min_mobs)
        + draws.unit(RollContext::PropCount) * f64::from(window.variance);
    let prop_count = (scaled * config.generation.prop_ratio).floor() as u32;
    for _ in 0..prop_count {
        let Some(cell) = draws.take_cell(&mut free) else {
            break;
        };
        let roll = draws.below(PropKind::TABLE.len() as u32, RollContext::Kind);
        let kind = PropKind::TABLE[roll as usize];
        let facing = Direction::CARDINALS
            [draws.below(Direction::CARDINALS.len() as u32, RollContext::Facing) as usize];
        report.props.push(state.add_prop(kind, cell, facing));
    }

    tracing::debug!(
        target: "game_core::generator",
        generation,
        near = window.near,
        wideness = window.wideness,
        mobs = report.mobs.len(),
        props = report.props.len(),
        "window extended"
    );

    report
}

/// Swap-removes every mob and prop whose y is below `min_boundary`.
/// Returns how many entities were retired.
pub fn retire(state: &mut GameState, min_boundary: i32) -> usize {
    let mut retired = 0;

    let mobs = &mut state.entities.mobs;
    let mut index = 0;
    while index < mobs.len() {
        if mobs[index].position.y < min_boundary {
            mobs.swap_remove(index);
            retired += 1;
        } else {
            index += 1;
        }
    }

    let props = &mut state.entities.props;
    let mut index = 0;
    while index < props.len() {
        if props[index].position.y < min_boundary {
            props.swap_remove(index);
            retired += 1;
        } else {
            index += 1;
        }
    }

    retired
}

/// Trigger policy: once the score reaches `max_boundary + margin`, move the
/// trailing edge up, retire what fell behind it and extend a new window
/// whose density scales with the score.
pub fn advance(state: &mut GameState, env: GameEnv<'_>) -> Option<SpawnWindow> {
    let policy = &env.config().generation;
    let score = state.progress.score;
    if score < state.window.max_boundary + policy.trigger_margin {
        return None;
    }

    let min_boundary = state.window.max_boundary - policy.trailing_gap;
    state.window.min_boundary = min_boundary;
    state.window.max_boundary += policy.window_span;
    let retired = retire(state, min_boundary);

    let bonus = |div: i32| u32::try_from(score / div.max(1)).unwrap_or(0);
    let window = SpawnWindow::new(
        state.window.max_boundary,
        policy.window_span,
        policy.base_min_mobs + bonus(policy.min_mobs_score_div),
        policy.base_variance + bonus(policy.variance_score_div),
    );

    tracing::debug!(
        target: "game_core::generator",
        retired,
        min_boundary = state.window.min_boundary,
        max_boundary = state.window.max_boundary,
        "retired content behind the trailing edge"
    );

    let elapsed = state.progress.elapsed;
    extend(state, env, window, elapsed);
    Some(window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{Env, PcgRng};
    use crate::state::MobKind;

    #[test]
    fn retire_handles_consecutive_removals() {
        let config = GameConfig::default();
        let mut state = GameState::with_seed(1, &config);
        for y in [1, 2, 3, 10, 0, 11] {
            state.add_mob(MobKind::Walker, Position::new(0, y), Direction::SOUTH);
            state.add_prop(PropKind::Stones, Position::new(1, y), Direction::SOUTH);
        }

        let retired = retire(&mut state, 5);

        assert_eq!(retired, 8);
        assert!(state.entities.mobs.iter().all(|mob| mob.position.y >= 5));
        assert!(state.entities.props.iter().all(|prop| prop.position.y >= 5));
        assert_eq!(state.entities.mobs.len(), 2);
    }

    #[test]
    fn extend_stops_when_the_window_is_full() {
        let config = GameConfig::default();
        let rng = PcgRng;
        let env = Env::new(&config, &rng).as_game_env();
        let mut state = GameState::with_seed(5, &config);

        let report = extend(
            &mut state,
            env,
            SpawnWindow::new(30, 1, 20, 0),
            Duration::ZERO,
        );

        assert_eq!(report.mobs.len(), GameConfig::LANE_COUNT);
        assert!(report.props.is_empty());
    }

    #[test]
    fn same_seed_replays_the_same_window() {
        let config = GameConfig::default();
        let rng = PcgRng;
        let env = Env::new(&config, &rng).as_game_env();
        let window = SpawnWindow::new(20, 20, 7, 12);

        let mut first = GameState::with_seed(99, &config);
        let mut second = GameState::with_seed(99, &config);
        extend(&mut first, env, window, Duration::ZERO);
        extend(&mut second, env, window, Duration::ZERO);

        assert_eq!(first.entities, second.entities);
    }

    #[test]
    fn advance_waits_for_the_margin() {
        let config = GameConfig::default();
        let rng = PcgRng;
        let env = Env::new(&config, &rng).as_game_env();
        let mut state = GameState::with_seed(3, &config);

        state.progress.score = 9;
        assert_eq!(advance(&mut state, env), None);

        state.progress.score = 10;
        let window = advance(&mut state, env).expect("window advances at the margin");
        assert_eq!(window, SpawnWindow::new(20, 20, 7, 12));
        assert_eq!(state.window.min_boundary, -5);
        assert_eq!(state.window.max_boundary, 20);
    }
}
