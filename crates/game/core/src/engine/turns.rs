use crate::action::{Continuation, MobAction, MobDecision};
use crate::ai::{self, Surroundings};
use crate::env::GameEnv;
use crate::state::{Direction, EntityId, TurnPhase};

use super::GameEngine;

/// Turn scheduling methods for GameEngine.
impl<'a> GameEngine<'a> {
    /// Current phase of the hero/mobs alternation.
    pub fn phase(&self) -> TurnPhase {
        self.state.turn.phase
    }

    /// Flips to the mobs phase and asks every alive mob for one action, in
    /// list order. The round ends when every action has completed.
    pub(super) fn begin_mobs_round(&mut self, env: GameEnv<'_>) {
        let roster: Vec<EntityId> = self
            .state
            .entities
            .alive_mobs()
            .map(|mob| mob.id)
            .collect();

        let turn = &mut self.state.turn;
        turn.phase = TurnPhase::MobsTurn;
        turn.round += 1;
        turn.pending = roster.len() as u32;
        let round = turn.round;

        tracing::debug!(
            target: "game_core::turns",
            round,
            mobs = roster.len(),
            "mobs turn"
        );

        for id in roster {
            if self.state.turn.round != round || !self.state.turn.is_mobs_turn() {
                break;
            }
            let Some(mob) = self.state.entities.mob(id) else {
                self.settle_mob(round);
                continue;
            };
            // Trampled earlier in this round.
            if !mob.alive {
                self.settle_mob(round);
                continue;
            }

            let decision = ai::decide(mob, &Surroundings::of(self.state, env.config()));
            self.apply_decision(env, id, decision, round);
        }

        if self.state.turn.pending == 0 && self.state.turn.round == round {
            self.end_mobs_round();
        }
    }

    fn apply_decision(
        &mut self,
        env: GameEnv<'_>,
        id: EntityId,
        decision: MobDecision,
        round: u64,
    ) {
        let then = Continuation::MobActed {
            round,
            hits_hero: decision.hits_hero,
        };

        let issued = match decision.action {
            MobAction::Pass => Ok(None),
            MobAction::Rotate { facing } => {
                if let Some(mob) = self.state.entities.mob_mut(id) {
                    mob.turn_to(facing);
                }
                Ok(None)
            }
            MobAction::Step { delta } => self.try_move(env, id, delta, then).map(Some),
            MobAction::Attack { facing } => self.try_attack(id, facing, then).map(Some),
            MobAction::Lunge { delta } => {
                self.gesture(id);
                self.strike_move(env, id, delta, then).map(Some)
            }
            MobAction::Charge { delta, kill } => {
                if let Some(victim) = kill {
                    let from = Direction::from_signs(delta.0, delta.1);
                    let fell = Continuation::MobFell {
                        ends_hero_turn: false,
                    };
                    self.kill(victim, from, fell);
                }
                self.try_move(env, id, delta, then).map(Some)
            }
        };

        match issued {
            Ok(Some(_)) => {}
            Ok(None) => self.settle_mob(round),
            Err(error) => {
                tracing::debug!(
                    target: "game_core::turns",
                    mob = %id,
                    %error,
                    "mob action rejected; passing"
                );
                self.settle_mob(round);
            }
        }
    }

    /// Handles a mob's action completion for `round`.
    pub(super) fn on_mob_acted(&mut self, round: u64, mob: EntityId, hits_hero: bool) {
        if round != self.state.turn.round || !self.state.turn.is_mobs_turn() {
            tracing::trace!(target: "game_core::turns", round, %mob, "stale completion");
            return;
        }
        if hits_hero && self.state.hero.alive {
            self.hero_death(mob);
            return;
        }
        self.settle_mob(round);
    }

    /// Counts one mob action as done; the last one hands control back.
    fn settle_mob(&mut self, round: u64) {
        let turn = &mut self.state.turn;
        if turn.round != round || !turn.is_mobs_turn() {
            return;
        }
        turn.pending = turn.pending.saturating_sub(1);
        if turn.pending == 0 {
            self.end_mobs_round();
        }
    }

    fn end_mobs_round(&mut self) {
        let turn = &mut self.state.turn;
        turn.phase = TurnPhase::HeroTurn;
        turn.pending = 0;
        tracing::debug!(target: "game_core::turns", round = turn.round, "hero turn");
    }

    /// Kills the hero, records the killer and freezes the clock. The round
    /// ends at once; its remaining completions are ignored.
    fn hero_death(&mut self, killer: EntityId) {
        let (kind, facing) = match self.state.entities.mob(killer) {
            Some(mob) => (mob.mob_kind(), mob.facing),
            None => (None, Direction::SOUTH),
        };

        self.state.progress.last_killed_by = kind;
        let fell = self.kill(EntityId::HERO, facing, Continuation::Nothing);

        let turn = &mut self.state.turn;
        turn.phase = TurnPhase::HeroTurn;
        turn.pending = 0;

        tracing::info!(
            target: "game_core::turns",
            killer = %killer,
            kind = kind.map(|kind| kind.title()).unwrap_or("mob"),
            score = self.state.progress.score,
            issued = fell.is_some(),
            "hero died"
        );
    }
}
