//! Simulation worker that owns the authoritative [`game_core::GameState`].
//!
//! Receives commands from [`crate::RuntimeHandle`] and the visual worker,
//! runs them through [`game_core::GameEngine`], forwards the visual requests
//! the engine queued, and publishes what changed to the EventBus.

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{Instant, MissedTickBehavior};

use game_core::{
    Direction, Env, GameConfig, GameEngine, GameError, GameState, HeroAction, Observables,
    PcgRng, TransitionId, WorldWindow,
};
use tracing::{debug, info};

use crate::events::{Event, EventBus, SessionEvent, TurnEvent, VisualEvent};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Submit a hero intent. Replies `None` when the intent was rejected.
    HeroIntent {
        direction: Direction,
        reply: oneshot::Sender<Option<HeroAction>>,
    },
    /// A visual transition of `session` finished playing.
    CompleteTransition { session: u64, id: TransitionId },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
    /// Start a fresh session. Replies with the new session id.
    Reset {
        seed: u64,
        reply: oneshot::Sender<u64>,
    },
}

/// What the worker compares across a command to derive events.
#[derive(Clone, Copy)]
struct Checkpoint {
    observables: Observables,
    round: u64,
    window: WorldWindow,
}

impl Checkpoint {
    fn of(state: &GameState) -> Self {
        Self {
            observables: state.observables(),
            round: state.turn.round,
            window: state.window,
        }
    }
}

/// Background task that processes gameplay commands.
pub struct SimulationWorker {
    state: GameState,
    config: GameConfig,
    rng: PcgRng,
    session: u64,
    command_rx: mpsc::Receiver<Command>,
    visual_tx: mpsc::UnboundedSender<VisualEvent>,
    event_bus: EventBus,
    observables_tx: watch::Sender<Observables>,
    clock_interval: std::time::Duration,
}

impl SimulationWorker {
    /// Creates a worker hosting a fresh session started from `seed`.
    pub fn new(
        config: GameConfig,
        seed: u64,
        command_rx: mpsc::Receiver<Command>,
        visual_tx: mpsc::UnboundedSender<VisualEvent>,
        event_bus: EventBus,
        observables_tx: watch::Sender<Observables>,
        clock_interval: std::time::Duration,
    ) -> Self {
        let mut worker = Self {
            state: GameState::with_seed(seed, &config),
            config,
            rng: PcgRng,
            session: 0,
            command_rx,
            visual_tx,
            event_bus,
            observables_tx,
            clock_interval,
        };
        worker.reset(seed);
        worker
    }

    /// Main worker loop. Ends once every command sender is gone.
    pub async fn run(mut self) {
        let period = self.clock_interval.max(std::time::Duration::from_millis(1));
        let mut last_tick = Instant::now();
        let mut clock = tokio::time::interval_at(last_tick + period, period);
        clock.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                now = clock.tick() => {
                    self.advance_clock(now - last_tick);
                    last_tick = now;
                }
            }
        }

        debug!(target: "runtime::worker", session = self.session, "simulation worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::HeroIntent { direction, reply } => {
                let result = self.hero_intent(direction);
                if reply.send(result).is_err() {
                    debug!("HeroIntent reply channel closed (caller dropped)");
                }
            }
            Command::CompleteTransition { session, id } => {
                self.complete_transition(session, id);
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::Reset { seed, reply } => {
                let session = self.reset(seed);
                if reply.send(session).is_err() {
                    debug!("Reset reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn hero_intent(&mut self, direction: Direction) -> Option<HeroAction> {
        let before = Checkpoint::of(&self.state);
        let env = Env::new(&self.config, &self.rng).as_game_env();
        let result = GameEngine::new(&mut self.state).hero_intent(env, direction);

        let action = match result {
            Ok(action) => Some(action),
            Err(error) => {
                debug!(
                    target: "runtime::worker",
                    %direction,
                    code = error.error_code(),
                    severity = error.severity().as_str(),
                    "hero intent rejected"
                );
                self.event_bus
                    .publish(Event::Turn(TurnEvent::IntentRejected { direction, error }));
                None
            }
        };

        self.publish_changes(before);
        action
    }

    fn complete_transition(&mut self, session: u64, id: TransitionId) {
        if session != self.session {
            debug!(
                target: "runtime::worker",
                stale = session,
                current = self.session,
                %id,
                "dropping completion from a previous session"
            );
            return;
        }

        let before = Checkpoint::of(&self.state);
        let env = Env::new(&self.config, &self.rng).as_game_env();
        GameEngine::new(&mut self.state).complete_transition(env, id);
        self.publish_changes(before);
    }

    fn reset(&mut self, seed: u64) -> u64 {
        self.session += 1;
        let env = Env::new(&self.config, &self.rng).as_game_env();
        GameEngine::new(&mut self.state).reset(env, seed);

        info!(
            target: "runtime::worker",
            session = self.session,
            seed,
            "session reset"
        );
        self.event_bus.publish(Event::Session(SessionEvent::Started {
            session: self.session,
            seed,
        }));
        self.observables_tx.send_replace(self.state.observables());
        self.forward_visuals();
        self.session
    }

    fn advance_clock(&mut self, elapsed: std::time::Duration) {
        GameEngine::new(&mut self.state).advance_time(elapsed);
        let observables = self.state.observables();
        self.observables_tx.send_if_modified(|current| {
            if *current == observables {
                return false;
            }
            *current = observables;
            true
        });
    }

    /// Diffs the state against `before`, publishes the resulting events and
    /// hands queued visual requests to the visual worker.
    fn publish_changes(&mut self, before: Checkpoint) {
        let after = Checkpoint::of(&self.state);

        if after.window != before.window {
            self.event_bus
                .publish(Event::Session(SessionEvent::WindowAdvanced {
                    min_boundary: after.window.min_boundary,
                    max_boundary: after.window.max_boundary,
                    score: after.observables.score,
                }));
        }

        if after.observables.turn_phase != before.observables.turn_phase
            || after.round != before.round
        {
            self.event_bus.publish(Event::Turn(TurnEvent::PhaseChanged {
                phase: after.observables.turn_phase,
                round: after.round,
            }));
        }

        if before.observables.hero_alive && !after.observables.hero_alive {
            info!(
                target: "runtime::worker",
                session = self.session,
                score = after.observables.score,
                killed_by = ?after.observables.last_killed_by,
                "hero died"
            );
            self.event_bus.publish(Event::Session(SessionEvent::HeroDied {
                killed_by: after.observables.last_killed_by,
                score: after.observables.score,
            }));
        }

        if after.observables != before.observables {
            self.observables_tx.send_replace(after.observables);
        }

        self.forward_visuals();
    }

    fn forward_visuals(&mut self) {
        for request in self.state.drain_visuals() {
            let event = VisualEvent {
                session: self.session,
                request,
            };
            self.event_bus.publish(Event::Visual(event.clone()));
            if self.visual_tx.send(event).is_err() {
                debug!(target: "runtime::worker", "visual worker gone; request dropped");
            }
        }
    }
}
