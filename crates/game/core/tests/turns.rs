use std::time::Duration;

use game_core::{
    Direction, Env, GameConfig, GameEngine, GameEnv, GameState, HeroAction, IntentError, MobKind,
    Occupant, PcgRng, Position, PropKind, TurnPhase, VisualKind, VisualRequest,
};

fn bare_state(config: &GameConfig) -> GameState {
    GameState::with_seed(17, config)
}

/// Completes every queued transition, including those issued by
/// completions, in issue order.
fn settle(engine: &mut GameEngine<'_>, env: GameEnv<'_>) -> Vec<VisualRequest> {
    let mut seen = Vec::new();
    for _ in 0..64 {
        let batch = engine.drain_visuals();
        if batch.is_empty() {
            break;
        }
        for request in &batch {
            assert!(engine.complete_transition(env, request.id));
        }
        seen.extend(batch);
    }
    seen
}

#[test]
fn hero_move_flips_to_mobs_turn_on_completion() {
    let config = GameConfig::default();
    let rng = PcgRng;
    let env = Env::new(&config, &rng).as_game_env();
    let mut state = bare_state(&config);
    let walker = state.add_mob(MobKind::Walker, Position::new(0, 8), Direction::SOUTH);
    let mut engine = GameEngine::new(&mut state);

    let action = engine.hero_intent(env, Direction::SOUTH).unwrap();
    assert_eq!(action, HeroAction::Move { to: Position::new(0, 1) });
    assert!(engine.state().hero.busy);
    assert_eq!(engine.phase(), TurnPhase::HeroTurn);

    let requests = engine.drain_visuals();
    assert_eq!(requests.len(), 1);
    assert!(matches!(
        requests[0].kind,
        VisualKind::Move { from, to } if from == Position::new(0, 2) && to == Position::new(0, 1)
    ));
    assert!(engine.complete_transition(env, requests[0].id));

    let state = engine.state();
    assert_eq!(state.hero.position, Position::new(0, 1));
    assert!(!state.hero.busy);
    assert_eq!(state.turn.phase, TurnPhase::MobsTurn);
    assert_eq!(state.turn.pending, 1);
    assert_eq!(
        state.entities.mob(walker).and_then(|mob| mob.moving_to),
        Some(Position::new(0, 7))
    );

    settle(&mut engine, env);
    assert_eq!(engine.phase(), TurnPhase::HeroTurn);
    assert_eq!(
        engine.state().entities.mob(walker).map(|mob| mob.position),
        Some(Position::new(0, 7))
    );
}

#[test]
fn round_waits_for_every_mob_in_any_order() {
    let config = GameConfig::default();
    let rng = PcgRng;
    let env = Env::new(&config, &rng).as_game_env();
    let mut state = bare_state(&config);
    for x in [-3, 0, 3] {
        state.add_mob(MobKind::Walker, Position::new(x, 12), Direction::SOUTH);
    }
    let mut engine = GameEngine::new(&mut state);

    engine.hero_intent(env, Direction::NORTH).unwrap();
    let hero_move = engine.drain_visuals();
    engine.complete_transition(env, hero_move[0].id);

    let mut steps = engine.drain_visuals();
    assert_eq!(steps.len(), 3);
    assert_eq!(engine.state().turn.pending, 3);

    steps.reverse();
    for (index, request) in steps.iter().enumerate() {
        assert_eq!(engine.phase(), TurnPhase::MobsTurn);
        engine.complete_transition(env, request.id);
        assert_eq!(engine.state().turn.pending, 2 - index as u32);
    }
    assert_eq!(engine.phase(), TurnPhase::HeroTurn);
}

#[test]
fn rejected_intents_leave_state_untouched() {
    let config = GameConfig::default();
    let rng = PcgRng;
    let env = Env::new(&config, &rng).as_game_env();
    let mut state = bare_state(&config);
    state.add_prop(PropKind::Grave, Position::new(0, 1), Direction::SOUTH);
    state.hero.position = Position::new(4, 2);
    state.window.min_boundary = 2;
    let before = state.clone();
    let mut engine = GameEngine::new(&mut state);

    assert_eq!(
        engine.hero_intent(env, Direction::EAST),
        Err(IntentError::OutOfLanes {
            target: Position::new(5, 2)
        })
    );
    assert_eq!(
        engine.hero_intent(env, Direction::SOUTH),
        Err(IntentError::BehindBoundary {
            target: Position::new(4, 1),
            min_boundary: 2
        })
    );
    assert_eq!(
        engine.hero_intent(env, Direction::NONE),
        Err(IntentError::ZeroDelta {
            actor: game_core::EntityId::HERO
        })
    );
    assert_eq!(engine.state(), &before);
}

#[test]
fn hero_cannot_walk_into_props_or_act_while_busy() {
    let config = GameConfig::default();
    let rng = PcgRng;
    let env = Env::new(&config, &rng).as_game_env();
    let mut state = bare_state(&config);
    let grave = state.add_prop(PropKind::Grave, Position::new(0, 1), Direction::SOUTH);
    let mut engine = GameEngine::new(&mut state);

    assert_eq!(
        engine.hero_intent(env, Direction::SOUTH),
        Err(IntentError::Blocked {
            target: Position::new(0, 1),
            occupant: Occupant::Prop(grave)
        })
    );

    engine.hero_intent(env, Direction::NORTH).unwrap();
    assert!(matches!(
        engine.hero_intent(env, Direction::NORTH),
        Err(IntentError::Busy { .. })
    ));
}

#[test]
fn hero_input_is_gated_during_mobs_turn() {
    let config = GameConfig::default();
    let rng = PcgRng;
    let env = Env::new(&config, &rng).as_game_env();
    let mut state = bare_state(&config);
    state.add_mob(MobKind::Walker, Position::new(-4, 14), Direction::SOUTH);
    let mut engine = GameEngine::new(&mut state);

    engine.hero_intent(env, Direction::NORTH).unwrap();
    let hero_move = engine.drain_visuals();
    engine.complete_transition(env, hero_move[0].id);

    assert_eq!(engine.phase(), TurnPhase::MobsTurn);
    assert_eq!(
        engine.hero_intent(env, Direction::NORTH),
        Err(IntentError::NotHeroTurn)
    );
}

#[test]
fn hero_strike_kills_then_starts_the_round() {
    let config = GameConfig::default();
    let rng = PcgRng;
    let env = Env::new(&config, &rng).as_game_env();
    let mut state = bare_state(&config);
    let victim = state.add_mob(MobKind::Walker, Position::new(0, 3), Direction::EAST);
    let mut engine = GameEngine::new(&mut state);

    assert_eq!(
        engine.hero_intent(env, Direction::NORTH),
        Ok(HeroAction::Attack { victim })
    );
    let attack = engine.drain_visuals();
    assert!(matches!(attack[0].kind, VisualKind::Attack { .. }));
    engine.complete_transition(env, attack[0].id);

    let death = engine.drain_visuals();
    assert_eq!(death.len(), 1);
    assert_eq!(death[0].actor, victim);
    assert!(matches!(death[0].kind, VisualKind::Death { .. }));
    assert_eq!(engine.phase(), TurnPhase::HeroTurn);
    assert!(engine.state().hero.busy);

    engine.complete_transition(env, death[0].id);
    let state = engine.state();
    assert!(state.entities.mob(victim).is_none());
    assert!(!state.hero.busy);
    assert_eq!(state.turn.round, 1);
    assert_eq!(state.turn.phase, TurnPhase::HeroTurn);
}

#[test]
fn hero_gets_one_action_while_the_victim_falls() {
    let config = GameConfig::default();
    let rng = PcgRng;
    let env = Env::new(&config, &rng).as_game_env();
    let mut state = bare_state(&config);
    let victim = state.add_mob(MobKind::Walker, Position::new(0, 3), Direction::SOUTH);
    state.add_mob(MobKind::Walker, Position::new(-4, 14), Direction::SOUTH);
    let mut engine = GameEngine::new(&mut state);

    engine.hero_intent(env, Direction::NORTH).unwrap();
    let attack = engine.drain_visuals();
    engine.complete_transition(env, attack[0].id);
    let death = engine.drain_visuals();
    assert_eq!(death[0].actor, victim);

    assert!(matches!(
        engine.hero_intent(env, Direction::EAST),
        Err(IntentError::Busy { .. })
    ));
    assert!(engine.drain_visuals().is_empty());
    assert_eq!(engine.state().hero.position, Position::new(0, 2));

    engine.complete_transition(env, death[0].id);
    assert_eq!(engine.state().turn.round, 1);
    assert_eq!(engine.phase(), TurnPhase::MobsTurn);

    settle(&mut engine, env);
    assert_eq!(engine.state().turn.round, 1);
    assert_eq!(engine.phase(), TurnPhase::HeroTurn);
}

#[test]
fn lunge_gesture_plays_along_the_current_facing() {
    let config = GameConfig::default();
    let rng = PcgRng;
    let env = Env::new(&config, &rng).as_game_env();
    let mut state = bare_state(&config);
    let floater = state.add_mob(MobKind::Floater, Position::new(2, 5), Direction::WEST);
    let mut engine = GameEngine::new(&mut state);

    engine.hero_intent(env, Direction::NORTH).unwrap();
    let hero_move = engine.drain_visuals();
    engine.complete_transition(env, hero_move[0].id);

    let issued = engine.drain_visuals();
    assert_eq!(issued.len(), 2);
    assert_eq!(issued[0].actor, floater);
    assert_eq!(
        issued[0].kind,
        VisualKind::Attack {
            facing: Direction::WEST
        }
    );
    assert!(matches!(
        issued[1].kind,
        VisualKind::Move { to, .. } if to == Position::new(0, 3)
    ));
}

#[test]
fn straight_charge_kills_the_hero_and_freezes_the_clock() {
    let config = GameConfig::default();
    let rng = PcgRng;
    let env = Env::new(&config, &rng).as_game_env();
    let mut state = bare_state(&config);
    state.add_mob(MobKind::ChargerA, Position::new(1, 8), Direction::SOUTH);
    let mut engine = GameEngine::new(&mut state);
    engine.advance_time(Duration::from_secs(3));

    engine.hero_intent(env, Direction::EAST).unwrap();
    let requests = settle(&mut engine, env);

    let state = engine.state();
    assert!(!state.hero.alive);
    assert_eq!(state.progress.last_killed_by, Some(MobKind::ChargerA));
    assert_eq!(state.turn.phase, TurnPhase::HeroTurn);
    assert_eq!(state.turn.pending, 0);
    assert!(requests.iter().any(|request| request.actor.is_hero()
        && matches!(request.kind, VisualKind::Death { from } if from == Direction::SOUTH)));

    engine.advance_time(Duration::from_secs(10));
    assert_eq!(engine.state().progress.elapsed, Duration::from_secs(3));
    assert_eq!(
        engine.hero_intent(env, Direction::NORTH),
        Err(IntentError::HeroDead)
    );
}

#[test]
fn charge_tramples_a_mob_that_has_not_acted_yet() {
    let config = GameConfig::default();
    let rng = PcgRng;
    let env = Env::new(&config, &rng).as_game_env();
    let mut state = bare_state(&config);
    state.hero.position = Position::new(0, 1);
    let bull = state.add_mob(MobKind::ChargerA, Position::new(0, 12), Direction::SOUTH);
    let walker = state.add_mob(MobKind::Walker, Position::new(0, 8), Direction::SOUTH);
    let mut engine = GameEngine::new(&mut state);

    engine.hero_intent(env, Direction::NORTH).unwrap();
    let hero_move = engine.drain_visuals();
    engine.complete_transition(env, hero_move[0].id);

    // Bull kills the walker on the way; the walker's own slot is skipped.
    let issued = engine.drain_visuals();
    assert_eq!(issued.len(), 2);
    assert_eq!(engine.state().turn.pending, 1);
    assert!(!engine.state().entities.mob(walker).map_or(true, |mob| mob.alive));

    for request in &issued {
        assert!(engine.complete_transition(env, request.id));
    }
    settle(&mut engine, env);
    let state = engine.state();
    assert_eq!(state.turn.phase, TurnPhase::HeroTurn);
    assert!(state.entities.mob(walker).is_none());
    assert_eq!(
        state.entities.mob(bull).map(|mob| mob.position),
        Some(Position::new(0, 8))
    );
}

#[test]
fn unknown_completions_are_ignored() {
    let config = GameConfig::default();
    let rng = PcgRng;
    let env = Env::new(&config, &rng).as_game_env();
    let mut state = bare_state(&config);
    let mut engine = GameEngine::new(&mut state);

    assert!(!engine.complete_transition(env, game_core::TransitionId(404)));

    engine.hero_intent(env, Direction::NORTH).unwrap();
    let hero_move = engine.drain_visuals();
    assert!(engine.complete_transition(env, hero_move[0].id));
    assert!(!engine.complete_transition(env, hero_move[0].id));
}
