use std::collections::HashSet;
use std::time::Duration;

use game_core::generator::{advance, extend};
use game_core::{
    Direction, Env, GameConfig, GameEngine, GameState, MobKind, PcgRng, Position, PropKind,
    SpawnWindow, TurnPhase, is_occupied,
};

fn occupied_cells(state: &GameState) -> Vec<Position> {
    let mut cells: Vec<Position> = state
        .entities
        .mobs
        .iter()
        .filter(|mob| mob.alive)
        .map(|mob| mob.position)
        .chain(state.entities.props.iter().map(|prop| prop.position))
        .collect();
    if state.hero.alive {
        cells.push(state.hero.position);
    }
    cells
}

fn assert_no_shared_cells(state: &GameState) {
    let cells = occupied_cells(state);
    let unique: HashSet<Position> = cells.iter().copied().collect();
    assert_eq!(unique.len(), cells.len(), "two entities share a cell");
}

#[test]
fn session_reset_lays_out_the_opening() {
    let config = GameConfig::default();
    let rng = PcgRng;
    let env = Env::new(&config, &rng).as_game_env();
    let mut state = GameState::with_seed(0, &config);
    let mut engine = GameEngine::new(&mut state);

    engine.reset(env, 2024);

    let state = engine.state();
    assert_eq!(state.hero.position, Position::new(0, 2));
    assert_eq!(state.hero.facing, Direction::SOUTH);
    assert_eq!(state.progress.score, 0);
    assert_eq!(state.turn.phase, TurnPhase::HeroTurn);
    assert_eq!(state.progress.generations, 2);
    assert!(state.entities.props.iter().any(|prop| prop.kind == PropKind::Grave
        && prop.position == Position::new(0, 1)));
    assert!(state.entities.props.iter().any(|prop| prop.kind == PropKind::Tree
        && prop.position == Position::new(3, 3)));
    // Opening windows: [4, 12) with 3..6 mobs and [9, 24) with 3..9 mobs.
    assert!((6..15).contains(&state.entities.mobs.len()));
    assert!(
        state
            .entities
            .mobs
            .iter()
            .all(|mob| (4..24).contains(&mob.position.y) && mob.kind_is(MobKind::Walker))
    );
    assert_no_shared_cells(state);
}

#[test]
fn window_placements_land_on_free_cells_inside_the_window() {
    let config = GameConfig::default();
    let rng = PcgRng;
    let env = Env::new(&config, &rng).as_game_env();

    for seed in 0..32 {
        let mut state = GameState::with_seed(seed, &config);
        state.add_prop(PropKind::Stones, Position::new(0, 21), Direction::SOUTH);
        state.add_mob(MobKind::Walker, Position::new(-2, 20), Direction::SOUTH);

        let window = SpawnWindow::new(20, 3, 3, 6);
        let report = extend(&mut state, env, window, Duration::ZERO);

        assert!((3..9).contains(&report.mobs.len()));
        let placed: Vec<Position> = report
            .mobs
            .iter()
            .filter_map(|id| state.entities.mob(*id).map(|mob| mob.position))
            .chain(report.props.iter().filter_map(|id| {
                state
                    .entities
                    .props
                    .iter()
                    .find(|prop| prop.id == *id)
                    .map(|prop| prop.position)
            }))
            .collect();

        for cell in &placed {
            assert!(window.contains_row(cell.y), "{cell} outside the window");
            assert!(config.in_lanes(cell.x), "{cell} outside the lanes");
            assert_ne!(*cell, Position::new(0, 21));
            assert_ne!(*cell, Position::new(-2, 20));
        }
        assert_no_shared_cells(&state);
    }
}

#[test]
fn first_window_past_twenty_forces_a_floater() {
    let config = GameConfig::default();
    let rng = PcgRng;
    let env = Env::new(&config, &rng).as_game_env();

    for seed in 0..16 {
        let mut state = GameState::with_seed(seed, &config);
        state.progress.score = 10;

        let window = advance(&mut state, env).expect("score reached the margin");

        assert_eq!(window.near, 20);
        assert!(state.progress.is_introduced(MobKind::Floater));
        assert!(
            state
                .entities
                .mobs
                .iter()
                .any(|mob| mob.kind_is(MobKind::Floater))
        );
    }
}

#[test]
fn advancing_retires_content_behind_the_trailing_edge() {
    let config = GameConfig::default();
    let rng = PcgRng;
    let env = Env::new(&config, &rng).as_game_env();
    let mut state = GameState::with_seed(8, &config);
    state.window.max_boundary = 40;
    state.progress.score = 50;
    for y in [10, 20, 34, 35, 36] {
        state.add_mob(MobKind::Walker, Position::new(-4, y), Direction::SOUTH);
        state.add_prop(PropKind::Tree, Position::new(4, y), Direction::SOUTH);
    }

    advance(&mut state, env).expect("score reached the margin");

    assert_eq!(state.window.min_boundary, 35);
    assert_eq!(state.window.max_boundary, 60);
    assert!(state.entities.mobs.iter().all(|mob| mob.position.y >= 35));
    assert!(state.entities.props.iter().all(|prop| prop.position.y >= 35));
    assert!(!is_occupied(&state, Position::new(-4, 34)));
}

#[test]
fn long_session_keeps_occupancy_and_progress_invariants() {
    let config = GameConfig::default();
    let rng = PcgRng;
    let env = Env::new(&config, &rng).as_game_env();

    for seed in [1, 7, 42] {
        let mut state = GameState::with_seed(seed, &config);
        let mut engine = GameEngine::new(&mut state);
        engine.reset(env, seed);

        let mut last_score = 0;
        let mut last_min = engine.state().window.min_boundary;
        let pattern = [
            Direction::NORTH,
            Direction::NORTH,
            Direction::EAST,
            Direction::NORTH,
            Direction::WEST,
            Direction::NORTH,
            Direction::WEST,
            Direction::NORTH,
            Direction::EAST,
        ];

        for turn in 0..400 {
            if !engine.state().hero.alive {
                break;
            }
            // Rejections are fine; the pattern probes around obstacles.
            let _ = engine.hero_intent(env, pattern[turn % pattern.len()]);
            for _ in 0..16 {
                let batch = engine.drain_visuals();
                if batch.is_empty() {
                    break;
                }
                for request in batch {
                    engine.complete_transition(env, request.id);
                }
            }

            let state = engine.state();
            assert!(state.is_quiescent());
            assert_eq!(state.turn.phase, TurnPhase::HeroTurn);
            assert_no_shared_cells(state);
            assert!(state.progress.score >= last_score);
            assert!(state.window.min_boundary >= last_min);
            assert!(
                state
                    .entities
                    .mobs
                    .iter()
                    .all(|mob| mob.position.y >= state.window.min_boundary)
            );
            assert!(
                state
                    .entities
                    .props
                    .iter()
                    .all(|prop| prop.position.y >= state.window.min_boundary)
            );
            last_score = state.progress.score;
            last_min = state.window.min_boundary;
        }
    }
}
