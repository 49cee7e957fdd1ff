//! Declarative battle events: triggers, effects, and their evaluation.
//!
//! A [`BattleEvent`] pairs a non-empty set of [`EventTrigger`]s with one
//! [`EventEffect`]. Events are data: the orchestration layer loads them with
//! the mission, and on turn boundaries, injuries, defeats, and mission
//! resolution the listener snapshots a [`TriggerContext`] and asks each
//! event whether every one of its triggers is satisfied.
mod battle_event;
mod context;
mod effect;
mod trigger;

pub use battle_event::{BattleEvent, BattleEventBuilder};
pub use context::{AffectedSquaddie, MissionCompletionStatus, TriggerContext};
pub use effect::{EffectPayload, EventEffect};
pub use trigger::{EventTrigger, SquaddieEventKind, TriggerCondition};

/// Errors raised when an event, trigger, or effect is built with missing
/// required pieces. These are programmer errors and abort construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EventValidationError {
    #[error("battle event has no triggers")]
    NoTriggers,

    #[error("battle event has no effect")]
    MissingEffect,

    #[error("squaddie trigger names no battle ids and no template ids")]
    SquaddieTriggerWithoutIds,

    #[error("cutscene effect has an empty cutscene id")]
    EmptyCutsceneId,
}
