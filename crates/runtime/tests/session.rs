use std::time::Duration;

use async_trait::async_trait;
use game_core::{
    Direction, GameConfig, GameState, HeroAction, IntentError, Occupant, Position, TurnPhase,
    VisualKind, VisualRequest,
};
use runtime::{
    Event, Runtime, RuntimeConfig, RuntimeHandle, SessionEvent, Topic, TurnEvent, VisualDriver,
    VisualEvent,
};
use tokio::sync::broadcast;
use tokio::time::timeout;

/// A corridor with the landmark props but no opening mobs.
fn quiet_config() -> RuntimeConfig {
    let mut game_config = GameConfig::default();
    game_config.generation.opening.clear();
    RuntimeConfig {
        game_config,
        seed: 5,
        clock_interval: Duration::from_secs(3600),
        ..RuntimeConfig::default()
    }
}

/// Polls until nothing is queued or in flight.
async fn settle(handle: &RuntimeHandle) -> GameState {
    timeout(Duration::from_secs(5), async {
        loop {
            let state = handle.query_state().await.expect("runtime should be alive");
            if state.is_quiescent() {
                return state;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await
    .expect("session should settle")
}

fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn hero_move_plays_out_and_returns_the_turn() {
    let runtime = Runtime::builder().config(quiet_config()).build();
    let handle = runtime.handle();
    let mut visual_rx = handle.subscribe(Topic::Visual);
    let mut turn_rx = handle.subscribe(Topic::Turn);

    let action = handle
        .hero_intent(Direction::NORTH)
        .await
        .expect("intent should be delivered");
    assert_eq!(
        action,
        Some(HeroAction::Move {
            to: Position::new(0, 3)
        })
    );

    let state = settle(&handle).await;
    assert_eq!(state.hero.position, Position::new(0, 3));
    assert_eq!(state.turn.phase, TurnPhase::HeroTurn);

    let visuals = drain(&mut visual_rx);
    assert_eq!(visuals.len(), 1);
    assert!(matches!(
        &visuals[0],
        Event::Visual(VisualEvent { session: 1, request })
            if request.actor.is_hero()
                && request.kind == VisualKind::Move { from: Position::new(0, 2), to: Position::new(0, 3) }
    ));

    let turns = drain(&mut turn_rx);
    assert!(turns.contains(&Event::Turn(TurnEvent::PhaseChanged {
        phase: TurnPhase::HeroTurn,
        round: 1,
    })));

    let observables = handle.observables();
    assert_eq!(observables.score, 1);
    assert!(observables.hero_alive);
    assert_eq!(observables.turn_phase, TurnPhase::HeroTurn);

    drop(handle);
    runtime.shutdown().await.expect("workers should stop");
}

#[tokio::test]
async fn rejected_intents_are_published_not_applied() {
    let runtime = Runtime::builder().config(quiet_config()).build();
    let handle = runtime.handle();
    let mut turn_rx = handle.subscribe(Topic::Turn);
    let before = handle.query_state().await.unwrap();
    let grave = before
        .entities
        .props
        .iter()
        .find(|prop| prop.position == Position::new(0, 1))
        .map(|prop| prop.id)
        .expect("landmark grave");

    let action = handle.hero_intent(Direction::SOUTH).await.unwrap();

    assert_eq!(action, None);
    assert_eq!(
        drain(&mut turn_rx),
        vec![Event::Turn(TurnEvent::IntentRejected {
            direction: Direction::SOUTH,
            error: IntentError::Blocked {
                target: Position::new(0, 1),
                occupant: Occupant::Prop(grave),
            },
        })]
    );
    assert_eq!(handle.query_state().await.unwrap(), before);
}

#[tokio::test]
async fn reset_starts_a_new_session() {
    let runtime = Runtime::builder().config(quiet_config()).build();
    let handle = runtime.handle();
    let mut session_rx = handle.subscribe(Topic::Session);

    handle.hero_intent(Direction::NORTH).await.unwrap();
    settle(&handle).await;
    assert_eq!(handle.observables().score, 1);

    let session = handle.reset(99).await.unwrap();
    assert_eq!(session, 2);
    assert!(drain(&mut session_rx).contains(&Event::Session(SessionEvent::Started {
        session: 2,
        seed: 99,
    })));

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.game_seed, 99);
    assert_eq!(state.hero.position, Position::new(0, 2));
    assert_eq!(handle.observables().score, 0);
}

/// Never finishes a transition; the test completes them by hand.
struct HeldDriver;

#[async_trait]
impl VisualDriver for HeldDriver {
    async fn play(&self, _request: &VisualRequest) {
        std::future::pending::<()>().await;
    }
}

#[tokio::test]
async fn completions_from_an_old_session_are_dropped() {
    let runtime = Runtime::builder()
        .config(quiet_config())
        .driver(HeldDriver)
        .build();
    let handle = runtime.handle();
    let mut visual_rx = handle.subscribe(Topic::Visual);

    handle.hero_intent(Direction::NORTH).await.unwrap();
    let Some(Event::Visual(VisualEvent { session, request })) = drain(&mut visual_rx).pop() else {
        panic!("hero move should be published");
    };
    assert_eq!(session, 1);

    handle.complete_transition(0, request.id).await.unwrap();
    let state = handle.query_state().await.unwrap();
    assert_eq!(state.in_flight(), 1);
    assert!(state.hero.busy);

    handle.complete_transition(session, request.id).await.unwrap();
    let state = handle.query_state().await.unwrap();
    assert!(state.is_quiescent());
    assert_eq!(state.hero.position, Position::new(0, 3));
}

#[tokio::test]
async fn default_corridor_survives_a_scripted_walk() {
    let runtime = Runtime::builder().seed(11).build();
    let handle = runtime.handle();
    let mut session_rx = handle.subscribe(Topic::Session);
    let pattern = [
        Direction::NORTH,
        Direction::EAST,
        Direction::NORTH,
        Direction::WEST,
        Direction::NORTH,
        Direction::WEST,
        Direction::NORTH,
        Direction::EAST,
    ];

    let mut last_score = 0;
    for direction in pattern.iter().cycle().take(60) {
        if !handle.observables().hero_alive {
            break;
        }
        handle.hero_intent(*direction).await.unwrap();
        let state = settle(&handle).await;

        assert_eq!(state.turn.phase, TurnPhase::HeroTurn);
        assert!(state.progress.score >= last_score);
        last_score = state.progress.score;
    }

    let observables = handle.observables();
    if !observables.hero_alive {
        assert!(observables.last_killed_by.is_some());
        assert!(drain(&mut session_rx)
            .iter()
            .any(|event| matches!(event, Event::Session(SessionEvent::HeroDied { .. }))));
    }
}
