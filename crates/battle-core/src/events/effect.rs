//! Side effects a battle event can apply.

use crate::modifier::ChallengeModifierKind;
use crate::state::CutsceneId;

/// The effect variants an event can carry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectPayload {
    /// Queue a cutscene for playback.
    Cutscene { cutscene_id: CutsceneId },

    /// Set a challenge modifier to a value.
    ChallengeModifier {
        kind: ChallengeModifierKind,
        value: bool,
    },
}

/// One event's side effect, with its at-most-once marker.
///
/// `already_applied` starts false. The evaluation engine only reads it —
/// flipping it is the caller's job once the side effect has durably landed
/// (e.g. after the cutscene was actually shown). Once true, the owning event
/// is permanently excluded from candidate evaluation; there is no reset
/// path.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventEffect {
    payload: EffectPayload,
    already_applied: bool,
}

impl EventEffect {
    pub fn cutscene(cutscene_id: impl Into<CutsceneId>) -> Self {
        Self {
            payload: EffectPayload::Cutscene {
                cutscene_id: cutscene_id.into(),
            },
            already_applied: false,
        }
    }

    pub fn challenge_modifier(kind: ChallengeModifierKind, value: bool) -> Self {
        Self {
            payload: EffectPayload::ChallengeModifier { kind, value },
            already_applied: false,
        }
    }

    pub fn payload(&self) -> &EffectPayload {
        &self.payload
    }

    pub fn already_applied(&self) -> bool {
        self.already_applied
    }

    /// Marks the effect as durably applied. Monotonic.
    pub fn mark_applied(&mut self) {
        self.already_applied = true;
    }
}
