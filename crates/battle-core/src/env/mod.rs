//! Traits describing the collaborators this core consumes.
//!
//! The battle simulator keeps unit data, the hex map, and cutscene playback
//! outside this crate. Oracles expose the few reads and writes the core
//! needs: who a squaddie is aligned with, whether it can still act, where
//! its movement checkpoint sits, and how to hand cutscenes off for playback.
//! In-memory implementations suitable for embedding and tests live in
//! [`memory`].
mod memory;

pub use memory::{GridStore, PendingCutscenes, SquaddieRoster};

use bitflags::bitflags;

use crate::state::{ActionId, CutsceneId, MapCoordinate, SquaddieId, TemplateId};

/// Allegiance of a squaddie within the battle.
///
/// `Player` marks the squad the human controls. `Ally` units fight on the
/// player's side but act on their own. Allegiance can matter twice in one
/// check: a unit's own affiliation and the affiliation of whoever it is
/// targeting.
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
pub enum Affiliation {
    Player,
    Ally,
    Enemy,
    /// Unaligned (neutral props, wildlife, uninitialized units).
    #[default]
    Neutral,
}

impl Affiliation {
    /// True for the player's own squad.
    pub const fn is_player(self) -> bool {
        matches!(self, Self::Player)
    }

    /// Whether two affiliations treat each other as friends.
    ///
    /// Player and ally units are friends of each other; enemies are friends
    /// among themselves; neutral units befriend nobody.
    pub const fn is_friend_of(self, other: Affiliation) -> bool {
        matches!(
            (self, other),
            (Self::Player | Self::Ally, Self::Player | Self::Ally) | (Self::Enemy, Self::Enemy)
        )
    }
}

bitflags! {
    /// Traits of a named action that constrain roll outcomes.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ActionTraits: u8 {
        /// The action's best possible outcome is a plain success.
        const CANNOT_CRITICALLY_SUCCEED = 1 << 0;
        /// The action's worst possible outcome is a plain failure.
        const CANNOT_CRITICALLY_FAIL    = 1 << 1;
    }
}

/// Read-only view of the squaddie roster.
pub trait SquaddieOracle {
    /// Allegiance of the squaddie, if it exists.
    fn affiliation(&self, id: SquaddieId) -> Option<Affiliation>;

    /// Template the squaddie was spawned from, if known.
    fn template(&self, id: SquaddieId) -> Option<TemplateId>;

    /// Whether the squaddie is still alive.
    fn is_alive(&self, id: SquaddieId) -> bool;

    /// Whether the squaddie has actions or movement left this turn.
    fn can_still_act(&self, id: SquaddieId) -> bool;
}

/// Catalog of named actions.
pub trait ActionOracle {
    /// Outcome-constraining traits of the action. Unknown actions carry no
    /// traits.
    fn action_traits(&self, id: ActionId) -> ActionTraits;
}

/// Checkpoint and position storage owned by the map collaborator.
///
/// The checkpoint coordinate is the position a squaddie's movement is
/// measured against when deciding whether a repositioning was fully undone.
/// It is set when the squaddie starts a decision sequence and reset to the
/// current position whenever the squaddie performs a non-movement action.
pub trait CheckpointStore {
    /// The squaddie's checkpoint coordinate, if one has been recorded.
    fn checkpoint(&self, id: SquaddieId) -> Option<MapCoordinate>;

    /// The squaddie's current coordinate, if it is on the map.
    fn coordinate(&self, id: SquaddieId) -> Option<MapCoordinate>;

    /// Moves the checkpoint to the squaddie's current coordinate.
    fn reset_checkpoint_to_current(&mut self, id: SquaddieId);
}

/// Batch hand-off point for cutscenes queued by battle events.
pub trait CutsceneQueue {
    fn enqueue_many(&mut self, ids: Vec<CutsceneId>);
}
