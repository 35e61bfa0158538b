//! Move and attack legality plus transition bookkeeping.
//!
//! Every method here validates against current occupancy, marks the actor
//! busy when the transition gates it, and queues a [`VisualRequest`]. State
//! mutation that depends on the animation finishing (positions, removals)
//! happens in [`GameEngine::settle_transition`].

use crate::action::{
    Continuation, Delta, PendingTransition, TransitionId, VisualKind, VisualRequest,
};
use crate::env::GameEnv;
use crate::grid::{self, Occupant};
use crate::state::{ActorKind, Direction, EntityId, Position};

use super::{GameEngine, IntentError};

impl<'a> GameEngine<'a> {
    /// Moves `actor` by `delta` once the move transition completes.
    ///
    /// # Errors
    ///
    /// Rejects busy actors, targets outside the lanes or behind the trailing
    /// edge, and occupied targets (reserved destinations included).
    pub(crate) fn try_move(
        &mut self,
        env: GameEnv<'_>,
        actor: EntityId,
        delta: Delta,
        then: Continuation,
    ) -> Result<TransitionId, IntentError> {
        self.begin_move(env, actor, delta, false, then)
    }

    /// Like [`Self::try_move`], but the hero's own cell is a legal target.
    pub(crate) fn strike_move(
        &mut self,
        env: GameEnv<'_>,
        actor: EntityId,
        delta: Delta,
        then: Continuation,
    ) -> Result<TransitionId, IntentError> {
        self.begin_move(env, actor, delta, true, then)
    }

    /// Starts a gating attack animation along `facing`.
    pub(crate) fn try_attack(
        &mut self,
        actor: EntityId,
        facing: Direction,
        then: Continuation,
    ) -> Result<TransitionId, IntentError> {
        let subject = self
            .state
            .actor_mut(actor)
            .ok_or(IntentError::UnknownActor { actor })?;
        if subject.busy {
            return Err(IntentError::Busy { actor });
        }
        subject.busy = true;
        subject.turn_to(facing);
        let facing = subject.facing;

        Ok(self.issue(actor, VisualKind::Attack { facing }, true, then))
    }

    /// Marks `target` dead and starts its death transition. Returns `None`
    /// when the target is unknown or already dead.
    pub(crate) fn kill(
        &mut self,
        target: EntityId,
        from: Direction,
        then: Continuation,
    ) -> Option<TransitionId> {
        let victim = self.state.actor_mut(target)?;
        if !victim.alive {
            return None;
        }
        victim.alive = false;

        tracing::debug!(target: "game_core::engine", victim = %target, "killed");
        Some(self.issue(target, VisualKind::Death { from }, false, then))
    }

    /// Non-gating attack animation along the actor's current facing.
    pub(crate) fn gesture(&mut self, actor: EntityId) -> Option<TransitionId> {
        let facing = self.state.actor(actor)?.facing;
        Some(self.issue(
            actor,
            VisualKind::Attack { facing },
            false,
            Continuation::Nothing,
        ))
    }

    pub(crate) fn check_bounds(
        &self,
        env: GameEnv<'_>,
        target: Position,
    ) -> Result<(), IntentError> {
        if !env.config().in_lanes(target.x) {
            return Err(IntentError::OutOfLanes { target });
        }
        let min_boundary = self.state.window.min_boundary;
        if target.y < min_boundary {
            return Err(IntentError::BehindBoundary {
                target,
                min_boundary,
            });
        }
        Ok(())
    }

    fn begin_move(
        &mut self,
        env: GameEnv<'_>,
        actor: EntityId,
        delta: Delta,
        onto_hero: bool,
        then: Continuation,
    ) -> Result<TransitionId, IntentError> {
        let subject = self
            .state
            .actor(actor)
            .ok_or(IntentError::UnknownActor { actor })?;
        if subject.busy {
            return Err(IntentError::Busy { actor });
        }
        if delta == (0, 0) {
            return Err(IntentError::ZeroDelta { actor });
        }

        let from = subject.position;
        let target = from.offset(delta.0, delta.1);
        self.check_bounds(env, target)?;

        match grid::occupant_at(self.state, target) {
            None => {}
            Some(Occupant::Hero) if onto_hero && !actor.is_hero() => {
                // Another striker already claims the hero's cell.
                if let Some(other) = grid::mob_at(&self.state.entities.mobs, target) {
                    return Err(IntentError::Blocked {
                        target,
                        occupant: Occupant::Mob(other.id),
                    });
                }
            }
            Some(occupant) => return Err(IntentError::Blocked { target, occupant }),
        }

        if let Some(subject) = self.state.actor_mut(actor) {
            subject.busy = true;
            subject.moving_to = Some(target);
            subject.turn_to(Direction::from_signs(delta.0, delta.1));
        }

        Ok(self.issue(actor, VisualKind::Move { from, to: target }, true, then))
    }

    /// Queues a visual request and records its continuation.
    fn issue(
        &mut self,
        actor: EntityId,
        kind: VisualKind,
        gating: bool,
        then: Continuation,
    ) -> TransitionId {
        let id = self.state.allocate_transition_id();
        let actor_kind = self
            .state
            .actor(actor)
            .map_or(ActorKind::Hero, |subject| subject.kind);
        let request = VisualRequest {
            id,
            actor,
            actor_kind,
            kind,
        };

        tracing::trace!(
            target: "game_core::engine",
            %id,
            %actor,
            kind = kind.as_str(),
            gating,
            "transition issued"
        );

        self.state.outbox.push(request);
        self.state.in_flight.push(PendingTransition {
            request,
            gating,
            then,
        });
        id
    }

    /// Applies the state change a finished transition stands for.
    pub(super) fn settle_transition(&mut self, pending: &PendingTransition) {
        let Some(subject) = self.state.actor_mut(pending.request.actor) else {
            return;
        };
        if pending.gating {
            subject.busy = false;
        }
        if let VisualKind::Move { to, .. } = pending.request.kind {
            subject.moving_to = None;
            if subject.alive {
                subject.position = to;
            }
        }
    }
}
