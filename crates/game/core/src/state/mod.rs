//! Authoritative game state representation.
//!
//! This module owns the data structures that describe the hero, mobs, props,
//! the world window and turn bookkeeping. Runtime layers clone or query this
//! state but mutate it exclusively through the engine.
pub mod types;

pub use types::{
    ActorKind, ActorState, Direction, EntitiesState, EntityId, MobKind, Position, ProgressState,
    PropKind, PropState, TurnPhase, TurnState, WorldWindow,
};

use crate::action::{PendingTransition, VisualRequest};
use crate::config::GameConfig;

/// Canonical snapshot of one session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed for deterministic generation.
    ///
    /// Set once per session and combined with the generation counter for
    /// every random draw.
    pub game_seed: u64,

    /// Sequential entity ID allocator. Never reused; 0 is the hero.
    next_entity_id: u32,

    /// Sequential visual transition allocator.
    next_transition_id: u64,

    pub hero: ActorState,
    pub entities: EntitiesState,
    pub window: WorldWindow,
    pub turn: TurnState,
    pub progress: ProgressState,

    /// Transitions issued but not yet completed, with their continuations.
    pub(crate) in_flight: Vec<PendingTransition>,

    /// Visual requests not yet handed to the collaborator.
    pub(crate) outbox: Vec<VisualRequest>,
}

impl GameState {
    /// Creates an empty session: hero at the configured start, no mobs or
    /// props, score zero. Opening content is added by the engine.
    pub fn with_seed(game_seed: u64, config: &GameConfig) -> Self {
        Self {
            game_seed,
            next_entity_id: 1,
            next_transition_id: 1,
            hero: ActorState::hero(config.hero_start),
            entities: EntitiesState::empty(),
            window: WorldWindow::default(),
            turn: TurnState::new(),
            progress: ProgressState::default(),
            in_flight: Vec::new(),
            outbox: Vec::new(),
        }
    }

    /// Allocates a new unique EntityId.
    ///
    /// # Panics
    ///
    /// Panics if we've exhausted all available IDs.
    pub fn allocate_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id = self
            .next_entity_id
            .checked_add(1)
            .expect("EntityId overflow");
        id
    }

    pub(crate) fn allocate_transition_id(&mut self) -> crate::action::TransitionId {
        let id = crate::action::TransitionId(self.next_transition_id);
        self.next_transition_id += 1;
        id
    }

    /// Adds a mob at `position` and returns its id.
    pub fn add_mob(&mut self, kind: MobKind, position: Position, facing: Direction) -> EntityId {
        let id = self.allocate_entity_id();
        self.entities
            .mobs
            .push(ActorState::mob(id, kind, position).with_facing(facing));
        id
    }

    /// Adds a prop at `position` and returns its id.
    pub fn add_prop(&mut self, kind: PropKind, position: Position, facing: Direction) -> EntityId {
        let id = self.allocate_entity_id();
        self.entities
            .props
            .push(PropState::new(id, position, facing, kind));
        id
    }

    /// Returns an actor (hero or mob) by id.
    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        if id.is_hero() {
            return Some(&self.hero);
        }
        self.entities.mob(id)
    }

    /// Returns a mutable actor (hero or mob) by id.
    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        if id.is_hero() {
            return Some(&mut self.hero);
        }
        self.entities.mob_mut(id)
    }

    /// Visual transitions still awaiting completion.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// True when nothing is in flight and no request is queued.
    pub fn is_quiescent(&self) -> bool {
        self.in_flight.is_empty() && self.outbox.is_empty()
    }

    /// Takes the queued visual requests, in issue order.
    pub fn drain_visuals(&mut self) -> Vec<VisualRequest> {
        std::mem::take(&mut self.outbox)
    }

    /// Read-only values a presentation layer polls once per frame.
    pub fn observables(&self) -> Observables {
        Observables {
            score: self.progress.score,
            hero_alive: self.hero.alive,
            last_killed_by: self.progress.last_killed_by,
            turn_phase: self.turn.phase,
            elapsed: self.progress.elapsed,
        }
    }
}

/// Per-frame read-only view of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observables {
    pub score: i32,
    pub hero_alive: bool,
    pub last_killed_by: Option<MobKind>,
    pub turn_phase: TurnPhase,
    pub elapsed: std::time::Duration,
}
