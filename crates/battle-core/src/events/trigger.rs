//! Trigger predicates evaluated against a context snapshot.

use std::collections::HashSet;

use crate::state::{SquaddieId, TemplateId};

use super::context::{MissionCompletionStatus, TriggerContext};
use super::EventValidationError;

/// Which squaddie bucket of the context a squaddie trigger reads.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SquaddieEventKind {
    /// Squaddies that were damaged and survived.
    Injured,
    /// Squaddies that were reduced to zero hit points.
    Defeated,
}

/// The predicate variants a trigger can carry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerCondition {
    /// Satisfied when the context's turn number falls inside the range, or
    /// matches `exact_turn` when one is given. Absent bounds are unbounded.
    TurnRange {
        minimum: Option<u32>,
        maximum: Option<u32>,
        exact_turn: Option<u32>,
        /// When set, turn 0 never satisfies this trigger even if the range
        /// would admit it.
        ignore_turn_zero: bool,
    },

    /// Satisfied when the matching context bucket names at least one
    /// squaddie from either id set.
    Squaddie {
        event: SquaddieEventKind,
        battle_ids: HashSet<SquaddieId>,
        template_ids: HashSet<TemplateId>,
    },

    /// Satisfied when the mission's completion status equals `expected`.
    CompletionStatus { expected: MissionCompletionStatus },
}

/// One declarative predicate of a battle event.
///
/// `system_reacted_to_trigger` is bookkeeping for higher-level systems that
/// want their own once-only reactions; this core stores it but never
/// consults it when evaluating satisfaction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventTrigger {
    condition: TriggerCondition,
    system_reacted_to_trigger: bool,
}

impl EventTrigger {
    /// Validates and wraps a condition.
    ///
    /// # Errors
    ///
    /// A squaddie condition with both id sets empty can never match anything
    /// and is rejected at construction time.
    pub fn new(condition: TriggerCondition) -> Result<Self, EventValidationError> {
        if let TriggerCondition::Squaddie {
            battle_ids,
            template_ids,
            ..
        } = &condition
            && battle_ids.is_empty()
            && template_ids.is_empty()
        {
            return Err(EventValidationError::SquaddieTriggerWithoutIds);
        }

        Ok(Self {
            condition,
            system_reacted_to_trigger: false,
        })
    }

    /// Convenience constructor for an exact-turn trigger.
    pub fn on_turn(turn: u32) -> Self {
        // Infallible: turn-range conditions have no validity rule.
        Self {
            condition: TriggerCondition::TurnRange {
                minimum: None,
                maximum: None,
                exact_turn: Some(turn),
                ignore_turn_zero: false,
            },
            system_reacted_to_trigger: false,
        }
    }

    /// Convenience constructor for a completion-status trigger.
    pub fn on_completion(expected: MissionCompletionStatus) -> Self {
        Self {
            condition: TriggerCondition::CompletionStatus { expected },
            system_reacted_to_trigger: false,
        }
    }

    pub fn condition(&self) -> &TriggerCondition {
        &self.condition
    }

    pub fn system_reacted(&self) -> bool {
        self.system_reacted_to_trigger
    }

    pub fn mark_system_reacted(&mut self) {
        self.system_reacted_to_trigger = true;
    }

    /// Evaluates this trigger against a context snapshot.
    pub fn is_satisfied(&self, context: &TriggerContext) -> bool {
        match &self.condition {
            TriggerCondition::TurnRange {
                minimum,
                maximum,
                exact_turn,
                ignore_turn_zero,
            } => {
                if *ignore_turn_zero && context.turn == 0 {
                    return false;
                }
                if let Some(exact) = exact_turn {
                    return context.turn == *exact;
                }
                minimum.is_none_or(|min| context.turn >= min)
                    && maximum.is_none_or(|max| context.turn <= max)
            }

            TriggerCondition::Squaddie {
                event,
                battle_ids,
                template_ids,
            } => context.bucket(*event).iter().any(|affected| {
                battle_ids.contains(&affected.battle_id)
                    || affected
                        .template
                        .is_some_and(|template| template_ids.contains(&template))
            }),

            TriggerCondition::CompletionStatus { expected } => context.completion == *expected,
        }
    }
}
