use crate::config::BattleConfig;
use crate::events::{BattleEvent, MissionCompletionStatus};
use crate::ledger::ActionLedger;
use crate::modifier::{ChallengeModifierKind, ChallengeModifierSetting};

use super::SquaddieId;

/// Everything this core owns for one battle.
///
/// One instance exists per battle. Cloning it clones the ledger, the event
/// list, and the modifier setting by value, so a snapshot never shares
/// mutable state with the live battle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    /// Queue, current turn, and archived history of squaddie actions.
    pub ledger: ActionLedger,

    /// Declarative trigger/effect events evaluated against this battle.
    pub events: Vec<BattleEvent>,

    /// Difficulty-adjustment flags that can preempt roll outcomes.
    pub modifiers: ChallengeModifierSetting,

    /// Mission status as last reported by the objective tracker.
    pub completion: MissionCompletionStatus,

    /// The squaddie expected to issue the next decision, if any.
    ///
    /// Set when a squaddie finishes an action and can still act this turn,
    /// cleared when its turn ends.
    pub pending_actor: Option<SquaddieId>,
}

impl BattleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a battle state with config-driven initial modifier values.
    pub fn with_config(config: &BattleConfig) -> Self {
        let mut state = Self::default();
        state
            .modifiers
            .set_setting(ChallengeModifierKind::TrainingWheels, config.training_wheels);
        state
    }
}
