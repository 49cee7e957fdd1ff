//! Challenge modifiers: difficulty flags that can preempt roll outcomes.

use std::collections::HashMap;

use tracing::debug;

use crate::env::{ActionOracle, ActionTraits, SquaddieOracle};
use crate::events::{BattleEvent, EffectPayload};
use crate::outcome::DegreeOfSuccess;
use crate::state::{ActionId, SquaddieId};

/// The difficulty-adjustment flags a battle can carry.
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
pub enum ChallengeModifierKind {
    /// Rigs rolls in the player's favor: the player's squad cannot roll
    /// badly against enemies, and enemies cannot roll well against the
    /// player's squad.
    TrainingWheels,
}

/// Result of asking whether a modifier preempts a roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RollPreemption {
    pub did_preempt: bool,

    /// The forced outcome when `did_preempt` is true; `None` otherwise.
    pub degree_of_success: DegreeOfSuccess,
}

impl RollPreemption {
    /// The roll proceeds normally.
    pub const fn no_preemption() -> Self {
        Self {
            did_preempt: false,
            degree_of_success: DegreeOfSuccess::None,
        }
    }

    /// The roll is skipped and the outcome forced.
    pub const fn forced(degree_of_success: DegreeOfSuccess) -> Self {
        Self {
            did_preempt: true,
            degree_of_success,
        }
    }
}

/// Per-battle challenge modifier values.
///
/// Created once per battle state, mutated only through
/// [`set_setting`](Self::set_setting) and
/// [`process_battle_events`](Self::process_battle_events), and cloned by
/// value when the battle state is cloned. Every modifier defaults to off.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChallengeModifierSetting {
    settings: HashMap<ChallengeModifierKind, bool>,
}

impl ChallengeModifierSetting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_setting(&self, kind: ChallengeModifierKind) -> bool {
        self.settings.get(&kind).copied().unwrap_or(false)
    }

    pub fn set_setting(&mut self, kind: ChallengeModifierKind, value: bool) {
        self.settings.insert(kind, value);
    }

    /// Applies every challenge-modifier effect in `events`, in order.
    ///
    /// Unconditional writes: when several events target the same modifier in
    /// one call, the last one wins. Events with other effect kinds are
    /// ignored.
    pub fn process_battle_events(&mut self, events: &[&BattleEvent]) {
        for event in events {
            if let EffectPayload::ChallengeModifier { kind, value } = event.effect().payload() {
                debug!(modifier = %kind, value, "challenge modifier set by battle event");
                self.set_setting(*kind, *value);
            }
        }
    }

    /// Decides whether a roll's outcome is forced before any dice logic
    /// runs.
    ///
    /// With training wheels off this never preempts. With them on, the rule
    /// is asymmetric in the player's favor: a player squaddie acting on a
    /// non-friend is forced to the best outcome its action allows, and any
    /// other actor targeting a player squaddie is denied a good roll. When
    /// preemption occurs the caller must skip normal outcome computation
    /// entirely.
    pub fn preempt_degree_of_success(
        &self,
        actor: SquaddieId,
        target: SquaddieId,
        action: ActionId,
        squaddies: &dyn SquaddieOracle,
        actions: &dyn ActionOracle,
    ) -> RollPreemption {
        if !self.get_setting(ChallengeModifierKind::TrainingWheels) {
            return RollPreemption::no_preemption();
        }

        let actor_affiliation = squaddies.affiliation(actor).unwrap_or_default();
        let target_affiliation = squaddies.affiliation(target).unwrap_or_default();
        let traits = actions.action_traits(action);

        if actor_affiliation.is_player() && !actor_affiliation.is_friend_of(target_affiliation) {
            if traits.contains(ActionTraits::CANNOT_CRITICALLY_SUCCEED) {
                return RollPreemption::forced(DegreeOfSuccess::Success);
            }
            return RollPreemption::forced(DegreeOfSuccess::CriticalSuccess);
        }

        if target_affiliation.is_player() {
            if traits.contains(ActionTraits::CANNOT_CRITICALLY_FAIL) {
                return RollPreemption::forced(DegreeOfSuccess::CriticalFailure);
            }
            return RollPreemption::forced(DegreeOfSuccess::Failure);
        }

        RollPreemption::no_preemption()
    }
}
