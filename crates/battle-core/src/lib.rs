//! Turn bookkeeping and reactive events for a hex-grid tactics battle.
//!
//! `battle-core` tracks what every squaddie did during a battle, detects
//! repositioning that was fully undone before it mattered, archives finished
//! turns into a replayable history, and drives a declarative trigger/effect
//! engine that reacts to turn boundaries, injuries, defeats, and mission
//! completion. All state mutation happens synchronously inside listeners
//! invoked by the [`dispatch::MessageBoard`]; collaborating systems (unit
//! roster, map checkpoints, cutscene playback) are injected as oracle traits
//! so the core stays deterministic and I/O free.
pub mod config;
pub mod dispatch;
pub mod env;
pub mod events;
pub mod ledger;
pub mod listener;
pub mod modifier;
pub mod outcome;
pub mod state;

pub use config::BattleConfig;
pub use dispatch::{
    BattleContext, BattleMessage, DispatchError, ListenerId, MessageBoard, MessageKind,
    MessageListener,
};
pub use env::{
    ActionOracle, ActionTraits, Affiliation, CheckpointStore, CutsceneQueue, GridStore,
    PendingCutscenes, SquaddieOracle, SquaddieRoster,
};
pub use events::{
    AffectedSquaddie, BattleEvent, BattleEventBuilder, EffectPayload, EventEffect, EventTrigger,
    EventValidationError, MissionCompletionStatus, SquaddieEventKind, TriggerCondition,
    TriggerContext,
};
pub use ledger::{
    ActionLedger, ActionRecord, AnimationResolution, LedgerError, MovementEffect,
    NamedActionEffect, RecordedAction, SquaddieChange, TurnBatch, TurnFlow,
    resolve_finished_animation,
};
pub use listener::{AnimationListener, EventMessageListener};
pub use modifier::{ChallengeModifierKind, ChallengeModifierSetting, RollPreemption};
pub use outcome::DegreeOfSuccess;
pub use state::{ActionId, BattleState, CutsceneId, MapCoordinate, SquaddieId, TemplateId};
