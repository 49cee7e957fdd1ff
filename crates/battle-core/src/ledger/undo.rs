//! Movement-undo reconciliation, driven by finished animations.

use tracing::debug;

use crate::env::{CheckpointStore, SquaddieOracle};
use crate::state::SquaddieId;

use super::{ActionLedger, LedgerError, RecordedAction};

/// Whether the acting squaddie keeps its turn after an action resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnFlow {
    /// The squaddie can still act and should issue another decision.
    ActorRetainsTurn,
    /// The squaddie is out of actions; its turn is over.
    ActorTurnEnded,
}

/// What [`resolve_finished_animation`] decided about the head record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationResolution {
    /// The squaddie whose action just finished animating.
    pub actor: SquaddieId,

    /// Whether the actor keeps its turn.
    pub flow: TurnFlow,

    /// True when the finished movement was expunged as fully undone instead
    /// of being committed.
    pub expunged: bool,
}

/// Reconciles the ledger after the head record's animation finishes.
///
/// A movement whose destination equals the squaddie's checkpoint coordinate
/// is a completed round trip: the squaddie is back where its current
/// decision sequence started, so the movement is expunged from the ready
/// queue and any trailing movement records already committed this turn are
/// trimmed with it. A movement that nets real displacement is committed as
/// part of the turn. Non-movement actions always commit, and they advance
/// the checkpoint to the squaddie's current position so later movement is
/// measured from there.
///
/// This lets a player preview and walk back repositioning freely without
/// polluting the turn history or spending the squaddie's action economy.
///
/// # Errors
///
/// Returns [`LedgerError::ReadyQueueEmpty`] when no action is awaiting
/// animation; there is nothing to reconcile and the call was a caller bug.
pub fn resolve_finished_animation(
    ledger: &mut ActionLedger,
    grid: &mut dyn CheckpointStore,
    squaddies: &dyn SquaddieOracle,
) -> Result<AnimationResolution, LedgerError> {
    let head = ledger.peek_head().ok_or(LedgerError::ReadyQueueEmpty)?;
    let actor = head.actor;
    let movement_destination = match &head.action {
        RecordedAction::Movement(movement) => Some(movement.destination),
        _ => None,
    };

    ledger.mark_head_animation_complete();

    let expunged = match movement_destination {
        Some(destination) => {
            let checkpoint = grid.checkpoint(actor);
            if checkpoint == Some(destination) {
                // Full retrace: the squaddie ended up where this decision
                // sequence started. The movement never happened.
                let trimmed = ledger.trim_undoable_movement(actor);
                ledger.drop_head();
                debug!(%actor, %destination, trimmed, "movement fully undone");
                true
            } else {
                ledger.commit_head_to_current_turn()?;
                false
            }
        }
        None => {
            ledger.commit_head_to_current_turn()?;
            grid.reset_checkpoint_to_current(actor);
            false
        }
    };

    let flow = if squaddies.can_still_act(actor) {
        TurnFlow::ActorRetainsTurn
    } else {
        TurnFlow::ActorTurnEnded
    };

    Ok(AnimationResolution {
        actor,
        flow,
        expunged,
    })
}
