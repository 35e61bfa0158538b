//! Glue code tying the runtime and terminal UI together.
//!
//! The event loop multiplexes runtime events, observable updates and a frame
//! tick that polls the keyboard. Hero input goes straight to the runtime; the
//! runtime answers through events, which refresh the cached state snapshot.
use anyhow::Result;
use crossterm::event::{self as term_event, Event as TermEvent, KeyEventKind};
use game_core::{GameState, IntentError, Observables};
use runtime::{
    Event as RuntimeEvent, InstantDriver, PacedDriver, Runtime, RuntimeConfig, RuntimeHandle,
    SessionEvent, Topic, TurnEvent,
};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::time::{self, Duration};

use crate::config::{CliConfig, clock_seed};
use crate::input::{self, KeyAction};
use crate::presentation::terminal::{self, Tui};
use crate::presentation::ui::{self, MessageLog, View};

const MESSAGE_CAPACITY: usize = 64;

pub struct CliApp {
    config: CliConfig,
}

impl CliApp {
    pub fn new(config: CliConfig) -> Self {
        Self { config }
    }

    pub async fn run(self) -> Result<()> {
        tracing::info!(seed = self.config.seed, "CLI client starting...");

        let runtime_config = RuntimeConfig {
            seed: self.config.seed,
            ..RuntimeConfig::default()
        };
        let lanes = (
            runtime_config.game_config.lane_min,
            runtime_config.game_config.lane_max,
        );
        let builder = Runtime::builder().config(runtime_config);
        let runtime = if self.config.animation_beat.is_zero() {
            builder.driver(InstantDriver).build()
        } else {
            builder
                .driver(PacedDriver::new(self.config.animation_beat))
                .build()
        };

        let handle = runtime.handle();
        let event_loop = EventLoop::new(handle.clone(), lanes, &self.config).await?;

        let mut terminal = terminal::init()?;
        let _guard = terminal::TerminalGuard;

        let result = event_loop.run(&mut terminal).await;

        drop(handle);
        runtime.shutdown().await?;
        terminal::restore()?;
        tracing::info!("CLI client exiting");

        result
    }
}

struct EventLoop {
    handle: RuntimeHandle,
    turn_rx: broadcast::Receiver<RuntimeEvent>,
    session_rx: broadcast::Receiver<RuntimeEvent>,
    observables_rx: tokio::sync::watch::Receiver<Observables>,
    state: GameState,
    messages: MessageLog,
    lanes: (i32, i32),
    frame_interval: Duration,
    dirty: bool,
}

impl EventLoop {
    async fn new(handle: RuntimeHandle, lanes: (i32, i32), config: &CliConfig) -> Result<Self> {
        let turn_rx = handle.subscribe(Topic::Turn);
        let session_rx = handle.subscribe(Topic::Session);
        let observables_rx = handle.watch_observables();
        let state = handle.query_state().await?;

        let mut messages = MessageLog::new(MESSAGE_CAPACITY);
        messages.push(format!(
            "You descend into the crypt (seed {}).",
            state.game_seed
        ));

        Ok(Self {
            handle,
            turn_rx,
            session_rx,
            observables_rx,
            state,
            messages,
            lanes,
            frame_interval: config.frame_interval,
            dirty: true,
        })
    }

    async fn run(mut self, terminal: &mut Tui) -> Result<()> {
        let mut frame = time::interval(self.frame_interval);

        loop {
            tokio::select! {
                result = self.turn_rx.recv() => {
                    if self.handle_runtime_event(result) {
                        break;
                    }
                }
                result = self.session_rx.recv() => {
                    if self.handle_runtime_event(result) {
                        break;
                    }
                }
                changed = self.observables_rx.changed() => {
                    if changed.is_err() {
                        tracing::warn!("Observables channel closed");
                        break;
                    }
                    self.dirty = true;
                }
                _ = frame.tick() => {
                    if self.handle_input_tick().await? {
                        break;
                    }
                    if self.dirty {
                        self.refresh().await?;
                        self.render(terminal)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Returns true when the runtime is gone.
    fn handle_runtime_event(&mut self, result: Result<RuntimeEvent, RecvError>) -> bool {
        match result {
            Ok(event) => {
                self.log_event(&event);
                self.dirty = true;
                false
            }
            Err(RecvError::Closed) => {
                tracing::warn!("Event stream closed");
                true
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Dropped {} stale events", skipped);
                self.dirty = true;
                false
            }
        }
    }

    fn log_event(&mut self, event: &RuntimeEvent) {
        match event {
            RuntimeEvent::Session(SessionEvent::Started { seed, .. }) => {
                self.messages
                    .push(format!("You descend into the crypt (seed {seed})."));
            }
            RuntimeEvent::Session(SessionEvent::WindowAdvanced { max_boundary, .. }) => {
                tracing::debug!(max_boundary, "corridor extended");
            }
            RuntimeEvent::Session(SessionEvent::HeroDied { killed_by, score }) => {
                let killer = killed_by.map(|kind| kind.title()).unwrap_or("Something");
                self.messages
                    .push(format!("A {killer} got you after {score} rows."));
            }
            RuntimeEvent::Turn(TurnEvent::IntentRejected {
                error: IntentError::Blocked { .. },
                ..
            }) => {
                self.messages.push("Something blocks the way.");
            }
            RuntimeEvent::Turn(TurnEvent::IntentRejected {
                error: IntentError::OutOfLanes { .. } | IntentError::BehindBoundary { .. },
                ..
            }) => {
                self.messages.push("The crypt walls hold you in.");
            }
            RuntimeEvent::Turn(_) | RuntimeEvent::Visual(_) => {}
        }
    }

    /// Poll for keyboard input without blocking the loop.
    async fn handle_input_tick(&mut self) -> Result<bool> {
        if !term_event::poll(Duration::from_millis(0))? {
            return Ok(false);
        }

        match term_event::read()? {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                match input::handle_key(key) {
                    KeyAction::Quit => return Ok(true),
                    KeyAction::Restart => {
                        let session = self.handle.reset(clock_seed()).await?;
                        tracing::info!(session, "restarted");
                    }
                    KeyAction::Hero(direction) => {
                        self.handle.hero_intent(direction).await?;
                    }
                    KeyAction::None => {}
                }
                self.dirty = true;
            }
            TermEvent::Resize(_, _) => self.dirty = true,
            _ => {}
        }

        Ok(false)
    }

    async fn refresh(&mut self) -> Result<()> {
        self.state = self.handle.query_state().await?;
        Ok(())
    }

    fn render(&mut self, terminal: &mut Tui) -> Result<()> {
        let view = View {
            state: &self.state,
            observables: *self.observables_rx.borrow_and_update(),
            lanes: self.lanes,
            messages: &self.messages,
        };
        ui::render(terminal, &view)?;
        // Keep polling while transitions are still playing out.
        self.dirty = !self.state.is_quiescent();
        Ok(())
    }
}
