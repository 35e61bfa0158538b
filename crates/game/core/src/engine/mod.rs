//! Turn scheduling and intent resolution.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Every
//! mutation (hero intents, transition completions, the session clock and
//! resets) flows through it. Calls run to completion synchronously; visual
//! transitions are queued on the state's outbox and resumed by
//! [`GameEngine::complete_transition`].

mod errors;
mod resolver;
mod turns;

pub use errors::IntentError;

use std::time::Duration;

use crate::action::{Continuation, TransitionId};
use crate::env::GameEnv;
use crate::generator;
use crate::grid::{self, Occupant};
use crate::state::{Direction, EntityId, GameState, Position};

/// What an accepted hero intent started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeroAction {
    Move { to: Position },
    Attack { victim: EntityId },
}

/// Game engine driving one session.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine with the given state.
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Replaces the session with a fresh one: hero at the start cell, the
    /// landmark props, and the opening windows.
    pub fn reset(&mut self, env: GameEnv<'_>, seed: u64) {
        let config = env.config();
        *self.state = GameState::with_seed(seed, config);

        for &(kind, position) in &config.generation.landmarks {
            self.state.add_prop(kind, position, Direction::SOUTH);
        }
        for &window in &config.generation.opening {
            generator::extend(self.state, env, window, Duration::ZERO);
        }

        tracing::info!(
            target: "game_core::engine",
            seed,
            mobs = self.state.entities.mobs.len(),
            props = self.state.entities.props.len(),
            "session started"
        );
    }

    /// Applies a hero intent: attack if an alive mob holds the target cell,
    /// otherwise move there.
    ///
    /// # Errors
    ///
    /// Returns an [`IntentError`] and leaves the state untouched when it is
    /// not the hero's turn, the hero is dead or busy, or the target is illegal.
    pub fn hero_intent(
        &mut self,
        env: GameEnv<'_>,
        direction: Direction,
    ) -> Result<HeroAction, IntentError> {
        if !self.state.hero.alive {
            return Err(IntentError::HeroDead);
        }
        if !self.state.turn.is_hero_turn() {
            return Err(IntentError::NotHeroTurn);
        }
        if self.state.hero.busy {
            return Err(IntentError::Busy {
                actor: EntityId::HERO,
            });
        }
        if direction.is_none() {
            return Err(IntentError::ZeroDelta {
                actor: EntityId::HERO,
            });
        }

        let target = self.state.hero.position.step(direction);
        self.check_bounds(env, target)?;

        match grid::occupant_at(self.state, target) {
            Some(Occupant::Mob(victim)) => {
                self.try_attack(
                    EntityId::HERO,
                    direction,
                    Continuation::HeroStruck { victim },
                )?;
                Ok(HeroAction::Attack { victim })
            }
            Some(occupant) => Err(IntentError::Blocked { target, occupant }),
            None => {
                self.try_move(
                    env,
                    EntityId::HERO,
                    (direction.dx, direction.dy),
                    Continuation::HeroMoved,
                )?;
                Ok(HeroAction::Move { to: target })
            }
        }
    }

    /// Delivers a completion signal. Unknown or already-completed ids are
    /// ignored and reported as `false`.
    pub fn complete_transition(&mut self, env: GameEnv<'_>, id: TransitionId) -> bool {
        let Some(index) = self
            .state
            .in_flight
            .iter()
            .position(|pending| pending.request.id == id)
        else {
            tracing::debug!(target: "game_core::engine", %id, "ignoring unknown transition");
            return false;
        };

        let pending = self.state.in_flight.swap_remove(index);
        self.settle_transition(&pending);
        self.resume(env, pending.request.actor, pending.then);
        true
    }

    /// Takes the visual requests queued since the last call.
    pub fn drain_visuals(&mut self) -> Vec<crate::action::VisualRequest> {
        self.state.drain_visuals()
    }

    /// Advances the session clock. The clock stops once the hero is dead.
    pub fn advance_time(&mut self, elapsed: Duration) {
        if self.state.hero.alive {
            self.state.progress.elapsed += elapsed;
        }
    }

    fn resume(&mut self, env: GameEnv<'_>, actor: EntityId, then: Continuation) {
        match then {
            Continuation::Nothing => {}
            Continuation::HeroMoved => self.on_hero_moved(env),
            Continuation::HeroStruck { victim } => {
                let facing = self.state.hero.facing;
                let fell = Continuation::MobFell {
                    ends_hero_turn: true,
                };
                if self.kill(victim, facing, fell).is_some() {
                    // The strike lasts until the victim is gone.
                    self.state.hero.busy = true;
                } else {
                    self.begin_mobs_round(env);
                }
            }
            Continuation::MobFell { ends_hero_turn } => {
                self.state.entities.remove_mob(actor);
                if ends_hero_turn {
                    self.state.hero.busy = false;
                    self.begin_mobs_round(env);
                }
            }
            Continuation::MobActed { round, hits_hero } => {
                self.on_mob_acted(round, actor, hits_hero);
            }
        }
    }

    fn on_hero_moved(&mut self, env: GameEnv<'_>) {
        let config = env.config();
        let progress = self.state.hero.position.y - config.progress_offset;
        self.state.progress.score = self.state.progress.score.max(progress);

        if let Some(window) = generator::advance(self.state, env) {
            tracing::info!(
                target: "game_core::generator",
                score = self.state.progress.score,
                near = window.near,
                min_boundary = self.state.window.min_boundary,
                "window advanced"
            );
        }

        self.begin_mobs_round(env);
    }
}
