//! Context snapshots triggers are evaluated against.

use crate::env::SquaddieOracle;
use crate::ledger::{ActionLedger, RecordedAction};
use crate::state::{SquaddieId, TemplateId};

use super::trigger::SquaddieEventKind;

/// How the mission currently stands.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MissionCompletionStatus {
    #[default]
    InProgress,
    Victory,
    Defeat,
}

/// A squaddie named in a context bucket, carried with both of its ids so
/// triggers can match on either space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AffectedSquaddie {
    pub battle_id: SquaddieId,
    pub template: Option<TemplateId>,
}

/// Snapshot of everything a trigger may ask about.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggerContext {
    /// Zero-based turn number, i.e. how many turns have been archived.
    pub turn: u32,

    /// Squaddies damaged but alive after the most recently finished action.
    pub injured: Vec<AffectedSquaddie>,

    /// Squaddies killed by the most recently finished action.
    pub defeated: Vec<AffectedSquaddie>,

    /// Mission status at snapshot time.
    pub completion: MissionCompletionStatus,
}

impl TriggerContext {
    /// Builds a snapshot from the battle's ledger and mission status.
    ///
    /// The injured/defeated buckets come from the head of the ready queue,
    /// the most recently finished action: targets with no net damage are
    /// ignored, damaged survivors land in `injured`, and the dead in
    /// `defeated`. With no pending action both buckets stay empty.
    pub fn snapshot(
        ledger: &ActionLedger,
        squaddies: &dyn SquaddieOracle,
        completion: MissionCompletionStatus,
    ) -> Self {
        let mut context = Self {
            turn: ledger.completed_turns(),
            injured: Vec::new(),
            defeated: Vec::new(),
            completion,
        };

        if let Some(head) = ledger.peek_head()
            && let RecordedAction::Named(named) = &head.action
        {
            for change in &named.changes {
                if change.net_damage <= 0 {
                    continue;
                }
                let affected = AffectedSquaddie {
                    battle_id: change.target,
                    template: squaddies.template(change.target),
                };
                if squaddies.is_alive(change.target) {
                    context.injured.push(affected);
                } else {
                    context.defeated.push(affected);
                }
            }
        }

        context
    }

    /// The bucket a squaddie trigger of the given kind reads.
    pub fn bucket(&self, kind: SquaddieEventKind) -> &[AffectedSquaddie] {
        match kind {
            SquaddieEventKind::Injured => &self.injured,
            SquaddieEventKind::Defeated => &self.defeated,
        }
    }
}
