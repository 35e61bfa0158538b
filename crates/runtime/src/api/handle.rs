//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving the hero, completing transitions, or streaming events from
//! specific topics.
use tokio::sync::{broadcast, mpsc, oneshot, watch};

use game_core::{Direction, GameState, HeroAction, Observables, TransitionId};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    observables: watch::Receiver<Observables>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        observables: watch::Receiver<Observables>,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            observables,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Submits a hero intent.
    ///
    /// Returns `None` when the intent was rejected; the reason is published
    /// as [`crate::TurnEvent::IntentRejected`].
    pub async fn hero_intent(&self, direction: Direction) -> Result<Option<HeroAction>> {
        self.request(|reply| Command::HeroIntent { direction, reply })
            .await
    }

    /// Reports a finished visual transition of `session`.
    ///
    /// Only needed by external drivers; the runtime's own visual worker
    /// completes the requests it plays.
    pub async fn complete_transition(&self, session: u64, id: TransitionId) -> Result<()> {
        self.command_tx
            .send(Command::CompleteTransition { session, id })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }

    /// Replaces the session with a fresh one. Returns the new session id.
    pub async fn reset(&self, seed: u64) -> Result<u64> {
        self.request(|reply| Command::Reset { seed, reply }).await
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Latest observables.
    pub fn observables(&self) -> Observables {
        *self.observables.borrow()
    }

    /// A receiver that is notified whenever the observables change.
    pub fn watch_observables(&self) -> watch::Receiver<Observables> {
        self.observables.clone()
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Visual` - Visual transition requests
    /// - `Topic::Turn` - Phase changes and rejected intents
    /// - `Topic::Session` - Session start, window advance, hero death
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut session_rx = handle.subscribe(Topic::Session);
    /// while let Ok(event) = session_rx.recv().await {
    ///     // Handle session events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
