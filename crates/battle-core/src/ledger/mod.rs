//! The action ledger: queue, current turn, and archived history.
//!
//! Actions flow through three stations. A finalized decision is enqueued on
//! the ready queue while its animation plays. When the animation finishes
//! the record is either committed into the current turn batch or, for a
//! movement the squaddie fully retraced, expunged as if it never happened
//! (see [`resolve_finished_animation`]). Ending a turn archives the current
//! batch into history, which is append-only and replayable.
mod batch;
mod record;
mod undo;

pub use batch::TurnBatch;
pub use record::{ActionRecord, MovementEffect, NamedActionEffect, RecordedAction, SquaddieChange};
pub use undo::{AnimationResolution, TurnFlow, resolve_finished_animation};

use std::collections::VecDeque;

use tracing::debug;

use crate::state::SquaddieId;

/// Errors from ledger operations that require a queue head.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// An operation expected a head record but the ready queue was empty.
    #[error("ready queue is empty")]
    ReadyQueueEmpty,
}

/// Turn bookkeeping for one battle.
///
/// Invariants:
/// - a record lives in at most one of the ready queue, the current turn
///   batch, or exactly one history entry;
/// - the ready queue is strictly FIFO;
/// - history entries are never mutated after [`end_turn`](Self::end_turn)
///   appends them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionLedger {
    ready_queue: VecDeque<ActionRecord>,
    current_turn: TurnBatch,
    history: Vec<TurnBatch>,
}

impl ActionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record to the tail of the ready queue.
    pub fn enqueue(&mut self, record: ActionRecord) {
        self.ready_queue.push_back(record);
    }

    /// The front of the ready queue, if any.
    pub fn peek_head(&self) -> Option<&ActionRecord> {
        self.ready_queue.front()
    }

    /// Removes and returns the front of the ready queue.
    ///
    /// Used when an action is retroactively judged to have never happened;
    /// the record is gone from the ledger entirely.
    pub fn drop_head(&mut self) -> Option<ActionRecord> {
        self.ready_queue.pop_front()
    }

    /// Flags the head record's animation as finished.
    ///
    /// Idempotent. Returns false when the queue is empty.
    pub fn mark_head_animation_complete(&mut self) -> bool {
        match self.ready_queue.front_mut() {
            Some(record) => {
                record.mark_animation_complete();
                true
            }
            None => false,
        }
    }

    /// Moves the front of the ready queue into the current turn batch.
    pub fn commit_head_to_current_turn(&mut self) -> Result<(), LedgerError> {
        let record = self
            .ready_queue
            .pop_front()
            .ok_or(LedgerError::ReadyQueueEmpty)?;
        self.current_turn.push(record);
        Ok(())
    }

    pub fn is_ready_queue_empty(&self) -> bool {
        self.ready_queue.is_empty()
    }

    pub fn is_current_turn_empty(&self) -> bool {
        self.current_turn.is_empty()
    }

    /// The batch being assembled for the turn in progress.
    pub fn current_turn(&self) -> &TurnBatch {
        &self.current_turn
    }

    /// Archives the current turn batch and starts a fresh one.
    ///
    /// Unconditional: every call appends exactly one history entry, empty or
    /// not. Callers decide when a turn has actually ended.
    pub fn end_turn(&mut self) {
        let batch = std::mem::take(&mut self.current_turn);
        debug!(
            turn = self.history.len(),
            records = batch.len(),
            "archiving turn batch"
        );
        self.history.push(batch);
    }

    /// Archived turns, oldest first.
    pub fn history(&self) -> &[TurnBatch] {
        &self.history
    }

    /// Number of turns already archived. Doubles as the zero-based number of
    /// the turn in progress.
    pub fn completed_turns(&self) -> u32 {
        self.history.len() as u32
    }

    /// Drops trailing movement records by `actor` from the current turn
    /// batch.
    ///
    /// Callers invoke this when the actor has fully retraced its movement
    /// back to its checkpoint, which retroactively undoes every trailing
    /// repositioning since its last non-movement action. No-op when the
    /// batch is empty or ends with another record kind.
    pub fn trim_undoable_movement(&mut self, actor: SquaddieId) -> usize {
        let removed = self.current_turn.trim_trailing_movement(actor);
        if removed > 0 {
            debug!(%actor, removed, "trimmed undone movement from current turn");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MapCoordinate;

    fn movement(actor: u32, to: (i32, i32)) -> ActionRecord {
        ActionRecord::movement(
            SquaddieId(actor),
            MapCoordinate::ORIGIN,
            MapCoordinate::new(to.0, to.1),
        )
    }

    #[test]
    fn ready_queue_is_fifo() {
        let mut ledger = ActionLedger::new();
        ledger.enqueue(movement(1, (0, 1)));
        ledger.enqueue(movement(2, (0, 2)));
        ledger.enqueue(ActionRecord::end_turn(SquaddieId(3)));

        assert_eq!(ledger.peek_head().unwrap().actor, SquaddieId(1));
        ledger.commit_head_to_current_turn().unwrap();
        assert_eq!(ledger.peek_head().unwrap().actor, SquaddieId(2));
        ledger.commit_head_to_current_turn().unwrap();
        assert_eq!(ledger.peek_head().unwrap().actor, SquaddieId(3));

        let committed: Vec<_> = ledger
            .current_turn()
            .records()
            .iter()
            .map(|record| record.actor)
            .collect();
        assert_eq!(committed, vec![SquaddieId(1), SquaddieId(2)]);
    }

    #[test]
    fn commit_on_empty_queue_is_an_observable_error() {
        let mut ledger = ActionLedger::new();
        assert_eq!(
            ledger.commit_head_to_current_turn(),
            Err(LedgerError::ReadyQueueEmpty)
        );
    }

    #[test]
    fn end_turn_always_produces_a_history_entry() {
        let mut ledger = ActionLedger::new();
        ledger.end_turn();

        ledger.enqueue(movement(1, (1, 0)));
        ledger.commit_head_to_current_turn().unwrap();
        ledger.end_turn();

        assert_eq!(ledger.history().len(), 2);
        assert!(ledger.history()[0].is_empty());
        assert_eq!(ledger.history()[1].len(), 1);
        assert!(ledger.is_current_turn_empty());
        assert_eq!(ledger.completed_turns(), 2);
    }

    #[test]
    fn trim_stops_at_first_non_movement_record() {
        let mut ledger = ActionLedger::new();
        ledger.enqueue(movement(1, (0, 1)));
        ledger.enqueue(ActionRecord::named(SquaddieId(1), crate::state::ActionId(7), vec![]));
        ledger.enqueue(movement(1, (0, 2)));
        ledger.enqueue(movement(1, (0, 3)));
        for _ in 0..4 {
            ledger.commit_head_to_current_turn().unwrap();
        }

        assert_eq!(ledger.trim_undoable_movement(SquaddieId(1)), 2);
        assert_eq!(ledger.current_turn().len(), 2);
        // Calling again removes nothing: the batch now ends with the named
        // action.
        assert_eq!(ledger.trim_undoable_movement(SquaddieId(1)), 0);
    }

    #[test]
    fn trim_ignores_trailing_movement_by_other_actors() {
        let mut ledger = ActionLedger::new();
        ledger.enqueue(movement(1, (0, 1)));
        ledger.enqueue(movement(2, (5, 5)));
        ledger.commit_head_to_current_turn().unwrap();
        ledger.commit_head_to_current_turn().unwrap();

        assert_eq!(ledger.trim_undoable_movement(SquaddieId(1)), 0);
        assert_eq!(ledger.current_turn().len(), 2);
    }
}
