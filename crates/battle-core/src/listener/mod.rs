//! The listeners this core registers on the message board.

use tracing::debug;

use crate::dispatch::{BattleContext, BattleMessage, MessageListener};
use crate::env::CutsceneQueue;
use crate::events::{BattleEvent, EffectPayload, TriggerContext};
use crate::ledger::{TurnFlow, resolve_finished_animation};
use crate::modifier::ChallengeModifierSetting;

/// Evaluates battle events on turn boundaries, injuries, defeats, and
/// mission resolution, and applies the effects of the ones that qualify.
///
/// Filtering and application are also exposed as plain functions so an
/// orchestrator can run the pipeline outside the message board.
#[derive(Debug, Default)]
pub struct EventMessageListener;

impl EventMessageListener {
    pub fn new() -> Self {
        Self
    }

    /// Selects the events whose effects should be applied for `context`.
    ///
    /// Events whose effect was already applied are dropped first; of the
    /// rest, an event qualifies when every one of its triggers is
    /// satisfied. Input order is preserved.
    pub fn filter_qualifying<'a>(
        events: &'a [BattleEvent],
        context: &TriggerContext,
    ) -> Vec<&'a BattleEvent> {
        events
            .iter()
            .filter(|event| !event.effect().already_applied())
            .filter(|event| event.is_satisfied(context))
            .collect()
    }

    /// Routes each event's effect to its collaborator.
    ///
    /// Cutscene effects are batched into one `enqueue_many` call; modifier
    /// effects go through the setting's batch apply. A missing collaborator
    /// silently skips that effect family — it means the feature is not
    /// wired up for this battle. This function never flips
    /// `already_applied`; that is the caller's job once the side effect has
    /// durably landed.
    pub fn apply_effects(
        events: &[&BattleEvent],
        cutscenes: Option<&mut (dyn CutsceneQueue + '_)>,
        modifiers: Option<&mut ChallengeModifierSetting>,
    ) {
        if let Some(queue) = cutscenes {
            let ids: Vec<_> = events
                .iter()
                .filter_map(|event| match event.effect().payload() {
                    EffectPayload::Cutscene { cutscene_id } => Some(cutscene_id.clone()),
                    _ => None,
                })
                .collect();
            if !ids.is_empty() {
                debug!(count = ids.len(), "queueing cutscenes from battle events");
                queue.enqueue_many(ids);
            }
        }

        if let Some(setting) = modifiers {
            setting.process_battle_events(events);
        }
    }
}

impl MessageListener for EventMessageListener {
    fn name(&self) -> &'static str {
        "battle_events"
    }

    fn receive_message(&mut self, message: &BattleMessage, context: &mut BattleContext<'_>) {
        match message {
            BattleMessage::MissionResolved { status } => context.state.completion = *status,
            BattleMessage::PhaseStarted
            | BattleMessage::SquaddieInjured { .. }
            | BattleMessage::SquaddieDefeated { .. } => {}
            _ => return,
        }

        let snapshot = TriggerContext::snapshot(
            &context.state.ledger,
            context.squaddies,
            context.state.completion,
        );
        let qualifying = Self::filter_qualifying(&context.state.events, &snapshot);
        if qualifying.is_empty() {
            return;
        }

        debug!(
            count = qualifying.len(),
            turn = snapshot.turn,
            "applying qualifying battle events"
        );
        Self::apply_effects(
            &qualifying,
            context.cutscenes.as_deref_mut(),
            Some(&mut context.state.modifiers),
        );
    }
}

/// Reconciles the action ledger when an animation finishes and routes the
/// turn-flow outcome back onto the board.
#[derive(Debug, Default)]
pub struct AnimationListener;

impl AnimationListener {
    pub fn new() -> Self {
        Self
    }
}

impl MessageListener for AnimationListener {
    fn name(&self) -> &'static str {
        "action_animation"
    }

    fn receive_message(&mut self, message: &BattleMessage, context: &mut BattleContext<'_>) {
        if !matches!(message, BattleMessage::AnimationFinished) {
            return;
        }

        match resolve_finished_animation(
            &mut context.state.ledger,
            &mut *context.grid,
            context.squaddies,
        ) {
            Ok(resolution) => match resolution.flow {
                TurnFlow::ActorRetainsTurn => {
                    context.state.pending_actor = Some(resolution.actor);
                    context.send(BattleMessage::NextActorChosen {
                        squaddie: resolution.actor,
                    });
                }
                TurnFlow::ActorTurnEnded => {
                    context.state.pending_actor = None;
                    context.send(BattleMessage::SquaddieTurnEnded {
                        squaddie: resolution.actor,
                    });
                }
            },
            Err(error) => {
                // Animation-finished with nothing awaiting animation is a
                // caller bug; tolerate it in release builds.
                debug_assert!(false, "{error}");
                debug!(%error, "dropping animation-finished message");
            }
        }
    }
}
