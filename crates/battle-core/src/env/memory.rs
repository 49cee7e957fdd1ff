//! In-memory oracle implementations.
//!
//! These back the collaborator traits with plain maps. Embedders with real
//! roster/map subsystems implement the traits directly; these are for
//! smaller hosts and for exercising the core in tests.

use std::collections::HashMap;

use crate::state::{ActionId, CutsceneId, MapCoordinate, SquaddieId, TemplateId};

use super::{ActionOracle, ActionTraits, Affiliation, CheckpointStore, CutsceneQueue, SquaddieOracle};

#[derive(Clone, Debug, Default)]
struct RosterEntry {
    affiliation: Affiliation,
    template: Option<TemplateId>,
    alive: bool,
    can_still_act: bool,
}

/// Map-backed squaddie roster and action catalog.
#[derive(Clone, Debug, Default)]
pub struct SquaddieRoster {
    squaddies: HashMap<SquaddieId, RosterEntry>,
    action_traits: HashMap<ActionId, ActionTraits>,
}

impl SquaddieRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a living squaddie that can still act.
    pub fn add_squaddie(
        &mut self,
        id: SquaddieId,
        template: TemplateId,
        affiliation: Affiliation,
    ) {
        self.squaddies.insert(
            id,
            RosterEntry {
                affiliation,
                template: Some(template),
                alive: true,
                can_still_act: true,
            },
        );
    }

    pub fn set_alive(&mut self, id: SquaddieId, alive: bool) {
        if let Some(entry) = self.squaddies.get_mut(&id) {
            entry.alive = alive;
        }
    }

    pub fn set_can_still_act(&mut self, id: SquaddieId, can_still_act: bool) {
        if let Some(entry) = self.squaddies.get_mut(&id) {
            entry.can_still_act = can_still_act;
        }
    }

    pub fn set_action_traits(&mut self, action: ActionId, traits: ActionTraits) {
        self.action_traits.insert(action, traits);
    }
}

impl SquaddieOracle for SquaddieRoster {
    fn affiliation(&self, id: SquaddieId) -> Option<Affiliation> {
        self.squaddies.get(&id).map(|entry| entry.affiliation)
    }

    fn template(&self, id: SquaddieId) -> Option<TemplateId> {
        self.squaddies.get(&id).and_then(|entry| entry.template)
    }

    fn is_alive(&self, id: SquaddieId) -> bool {
        self.squaddies.get(&id).is_some_and(|entry| entry.alive)
    }

    fn can_still_act(&self, id: SquaddieId) -> bool {
        self.squaddies
            .get(&id)
            .is_some_and(|entry| entry.can_still_act)
    }
}

impl ActionOracle for SquaddieRoster {
    fn action_traits(&self, id: ActionId) -> ActionTraits {
        self.action_traits.get(&id).copied().unwrap_or_default()
    }
}

/// Map-backed coordinate and checkpoint storage.
#[derive(Clone, Debug, Default)]
pub struct GridStore {
    coordinates: HashMap<SquaddieId, MapCoordinate>,
    checkpoints: HashMap<SquaddieId, MapCoordinate>,
}

impl GridStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a squaddie and checkpoints it at that coordinate.
    pub fn place(&mut self, id: SquaddieId, at: MapCoordinate) {
        self.coordinates.insert(id, at);
        self.checkpoints.insert(id, at);
    }

    /// Moves a squaddie without touching its checkpoint.
    pub fn move_to(&mut self, id: SquaddieId, to: MapCoordinate) {
        self.coordinates.insert(id, to);
    }
}

impl CheckpointStore for GridStore {
    fn checkpoint(&self, id: SquaddieId) -> Option<MapCoordinate> {
        self.checkpoints.get(&id).copied()
    }

    fn coordinate(&self, id: SquaddieId) -> Option<MapCoordinate> {
        self.coordinates.get(&id).copied()
    }

    fn reset_checkpoint_to_current(&mut self, id: SquaddieId) {
        if let Some(&at) = self.coordinates.get(&id) {
            self.checkpoints.insert(id, at);
        }
    }
}

/// Cutscene queue that simply collects ids until the playback layer drains
/// them.
#[derive(Clone, Debug, Default)]
pub struct PendingCutscenes {
    queued: Vec<CutsceneId>,
}

impl PendingCutscenes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queued(&self) -> &[CutsceneId] {
        &self.queued
    }

    /// Hands the queued cutscenes to the caller, emptying the queue.
    pub fn drain(&mut self) -> Vec<CutsceneId> {
        std::mem::take(&mut self.queued)
    }
}

impl CutsceneQueue for PendingCutscenes {
    fn enqueue_many(&mut self, ids: Vec<CutsceneId>) {
        self.queued.extend(ids);
    }
}
