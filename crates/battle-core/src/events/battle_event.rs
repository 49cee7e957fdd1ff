//! Trigger-set/effect pairs and their validating builder.

use super::context::TriggerContext;
use super::effect::{EffectPayload, EventEffect};
use super::trigger::EventTrigger;
use super::EventValidationError;

/// A declarative battle event: fire the effect when every trigger holds.
///
/// Constructed through [`BattleEvent::builder`]; an event with no triggers
/// or no effect cannot exist.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleEvent {
    triggers: Vec<EventTrigger>,
    effect: EventEffect,
}

impl BattleEvent {
    pub fn builder() -> BattleEventBuilder {
        BattleEventBuilder::default()
    }

    pub fn triggers(&self) -> &[EventTrigger] {
        &self.triggers
    }

    pub fn effect(&self) -> &EventEffect {
        &self.effect
    }

    /// Mutable access for the caller that flips `already_applied` after the
    /// side effect durably lands.
    pub fn effect_mut(&mut self) -> &mut EventEffect {
        &mut self.effect
    }

    /// True iff every trigger in this event is satisfied by `context`.
    pub fn is_satisfied(&self, context: &TriggerContext) -> bool {
        self.triggers
            .iter()
            .all(|trigger| trigger.is_satisfied(context))
    }
}

/// Builder enforcing event validity at construction time.
#[derive(Debug, Default)]
pub struct BattleEventBuilder {
    triggers: Vec<EventTrigger>,
    effect: Option<EventEffect>,
}

impl BattleEventBuilder {
    /// Adds one trigger.
    pub fn trigger(mut self, trigger: EventTrigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    /// Sets the effect, replacing any previous one.
    pub fn effect(mut self, effect: EventEffect) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Builds the event.
    ///
    /// # Errors
    ///
    /// Fails on an empty trigger list, a missing effect, or a cutscene
    /// effect with an empty id.
    pub fn build(self) -> Result<BattleEvent, EventValidationError> {
        if self.triggers.is_empty() {
            return Err(EventValidationError::NoTriggers);
        }
        let effect = self.effect.ok_or(EventValidationError::MissingEffect)?;
        if let EffectPayload::Cutscene { cutscene_id } = effect.payload()
            && cutscene_id.is_empty()
        {
            return Err(EventValidationError::EmptyCutsceneId);
        }

        Ok(BattleEvent {
            triggers: self.triggers,
            effect,
        })
    }
}
