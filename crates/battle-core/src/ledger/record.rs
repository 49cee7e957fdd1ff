//! A single performed or pending squaddie action.

use crate::outcome::DegreeOfSuccess;
use crate::state::{ActionId, MapCoordinate, SquaddieId};

/// Net change one action inflicted on one target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SquaddieChange {
    pub target: SquaddieId,

    /// Damage after absorption and healing. Zero or negative means the
    /// target was not hurt by this action.
    pub net_damage: i32,

    /// Outcome tier of the roll against this target.
    pub outcome: DegreeOfSuccess,
}

impl SquaddieChange {
    pub fn new(target: SquaddieId, net_damage: i32, outcome: DegreeOfSuccess) -> Self {
        Self {
            target,
            net_damage,
            outcome,
        }
    }
}

/// Movement payload: where the squaddie started and where it ended up.
///
/// The path between the two is owned by the map collaborator; this core only
/// needs the endpoints to detect a full retrace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementEffect {
    pub start: MapCoordinate,
    pub destination: MapCoordinate,
}

/// Named-action payload: which catalog action was used and what it did to
/// each target.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedActionEffect {
    pub action: ActionId,
    pub changes: Vec<SquaddieChange>,
}

/// What a squaddie actually did, with the kind-specific payload.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecordedAction {
    /// Repositioning on the map. May later be judged to have never happened.
    Movement(MovementEffect),

    /// A named action from the catalog, with per-target outcomes.
    Named(NamedActionEffect),

    /// The squaddie explicitly ended its turn.
    EndTurn,
}

/// One performed or pending action in the ledger.
///
/// Records are created when the orchestration layer finalizes a decision and
/// are mutated exactly once: `animation_completed` flips from false to true
/// when the rendering layer reports the action's animation done. A record
/// archived into a turn batch is never touched again.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRecord {
    pub actor: SquaddieId,
    pub action: RecordedAction,
    animation_completed: bool,
}

impl ActionRecord {
    pub fn new(actor: SquaddieId, action: RecordedAction) -> Self {
        Self {
            actor,
            action,
            animation_completed: false,
        }
    }

    pub fn movement(actor: SquaddieId, start: MapCoordinate, destination: MapCoordinate) -> Self {
        Self::new(actor, RecordedAction::Movement(MovementEffect { start, destination }))
    }

    pub fn named(actor: SquaddieId, action: ActionId, changes: Vec<SquaddieChange>) -> Self {
        Self::new(actor, RecordedAction::Named(NamedActionEffect { action, changes }))
    }

    pub fn end_turn(actor: SquaddieId) -> Self {
        Self::new(actor, RecordedAction::EndTurn)
    }

    pub fn is_movement(&self) -> bool {
        matches!(self.action, RecordedAction::Movement(_))
    }

    pub fn animation_completed(&self) -> bool {
        self.animation_completed
    }

    /// Marks the animation finished. Monotonic: once set it stays set.
    pub fn mark_animation_complete(&mut self) {
        self.animation_completed = true;
    }

    /// Returns the snake_case name of the action kind, for logging keys.
    pub fn as_snake_case(&self) -> &'static str {
        match self.action {
            RecordedAction::Movement(_) => "movement",
            RecordedAction::Named(_) => "named_action",
            RecordedAction::EndTurn => "end_turn",
        }
    }
}
