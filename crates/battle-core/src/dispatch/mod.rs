//! Synchronous message dispatch between the battle's systems.
//!
//! The board is the explicit, in-process replacement for a global pub/sub
//! singleton: listeners register for specific message kinds and are invoked
//! synchronously, in registration order, on the simulation thread. A
//! listener may queue follow-up messages through its [`BattleContext`];
//! the board drains them in the same dispatch, with a depth cap so two
//! listeners feeding each other cannot spin forever.

use std::collections::{HashSet, VecDeque};

use tracing::trace;

use crate::config::BattleConfig;
use crate::env::{ActionOracle, CheckpointStore, CutsceneQueue, SquaddieOracle};
use crate::events::MissionCompletionStatus;
use crate::state::{BattleState, SquaddieId};

/// Routing key of a [`BattleMessage`].
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
pub enum MessageKind {
    AnimationFinished,
    PhaseStarted,
    SquaddieInjured,
    SquaddieDefeated,
    MissionResolved,
    SquaddieTurnEnded,
    NextActorChosen,
}

/// Discrete game events this core reacts to or emits.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleMessage {
    /// The rendering layer finished animating the head of the ready queue.
    AnimationFinished,

    /// A new turn began; the previous one has been archived.
    PhaseStarted,

    /// Squaddies were damaged and survived.
    SquaddieInjured { ids: Vec<SquaddieId> },

    /// Squaddies were reduced to zero hit points.
    SquaddieDefeated { ids: Vec<SquaddieId> },

    /// The objective tracker resolved the mission.
    MissionResolved { status: MissionCompletionStatus },

    /// Emitted by this core when a squaddie runs out of actions.
    SquaddieTurnEnded { squaddie: SquaddieId },

    /// Emitted by this core when a squaddie keeps its turn and should issue
    /// another decision.
    NextActorChosen { squaddie: SquaddieId },
}

impl BattleMessage {
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::AnimationFinished => MessageKind::AnimationFinished,
            Self::PhaseStarted => MessageKind::PhaseStarted,
            Self::SquaddieInjured { .. } => MessageKind::SquaddieInjured,
            Self::SquaddieDefeated { .. } => MessageKind::SquaddieDefeated,
            Self::MissionResolved { .. } => MessageKind::MissionResolved,
            Self::SquaddieTurnEnded { .. } => MessageKind::SquaddieTurnEnded,
            Self::NextActorChosen { .. } => MessageKind::NextActorChosen,
        }
    }
}

/// Everything a listener may touch while handling a message.
///
/// Bundles the battle's owned state with the injected collaborators, the
/// same way the engine-side oracle aggregate does for world data. The
/// cutscene queue is optional: a battle without cutscene playback wired up
/// silently skips that effect family.
pub struct BattleContext<'a> {
    pub state: &'a mut BattleState,
    pub grid: &'a mut dyn CheckpointStore,
    pub squaddies: &'a dyn SquaddieOracle,
    pub actions: &'a dyn ActionOracle,
    pub cutscenes: Option<&'a mut dyn CutsceneQueue>,
    outbox: Vec<BattleMessage>,
}

impl<'a> BattleContext<'a> {
    pub fn new(
        state: &'a mut BattleState,
        grid: &'a mut dyn CheckpointStore,
        squaddies: &'a dyn SquaddieOracle,
        actions: &'a dyn ActionOracle,
        cutscenes: Option<&'a mut dyn CutsceneQueue>,
    ) -> Self {
        Self {
            state,
            grid,
            squaddies,
            actions,
            cutscenes,
            outbox: Vec::new(),
        }
    }

    /// Queues a follow-up message, delivered by the board after the current
    /// message finishes with every listener.
    pub fn send(&mut self, message: BattleMessage) {
        self.outbox.push(message);
    }

    fn drain_outbox(&mut self) -> Vec<BattleMessage> {
        std::mem::take(&mut self.outbox)
    }
}

/// A system that reacts to battle messages.
pub trait MessageListener {
    /// Short name used in dispatch traces.
    fn name(&self) -> &'static str;

    fn receive_message(&mut self, message: &BattleMessage, context: &mut BattleContext<'_>);
}

/// Handle to a registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

/// Errors surfaced by message dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// Listener follow-ups chained past the configured cap.
    #[error("message chain too deep: {kind} reached depth {depth}")]
    MessageChainTooDeep { kind: MessageKind, depth: usize },
}

struct Registration {
    listener: Box<dyn MessageListener>,
    kinds: HashSet<MessageKind>,
}

/// Registration-order synchronous dispatcher.
pub struct MessageBoard {
    registrations: Vec<Registration>,
    max_chain: usize,
}

impl MessageBoard {
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
            max_chain: BattleConfig::DEFAULT_MAX_MESSAGE_CHAIN,
        }
    }

    pub fn with_config(config: &BattleConfig) -> Self {
        Self {
            registrations: Vec::new(),
            max_chain: config.max_message_chain,
        }
    }

    /// Registers a listener for the given message kinds.
    ///
    /// Listeners subscribed to the same kind are invoked in the order they
    /// were added.
    pub fn add_listener(
        &mut self,
        listener: Box<dyn MessageListener>,
        kinds: impl IntoIterator<Item = MessageKind>,
    ) -> ListenerId {
        let id = ListenerId(self.registrations.len());
        self.registrations.push(Registration {
            listener,
            kinds: kinds.into_iter().collect(),
        });
        id
    }

    /// Delivers a message, then any follow-ups listeners queued, until the
    /// chain drains or exceeds the depth cap.
    pub fn send_message(
        &mut self,
        context: &mut BattleContext<'_>,
        message: BattleMessage,
    ) -> Result<(), DispatchError> {
        let mut pending = VecDeque::from([message]);
        let mut delivered = 0usize;

        while let Some(message) = pending.pop_front() {
            delivered += 1;
            if delivered > self.max_chain {
                return Err(DispatchError::MessageChainTooDeep {
                    kind: message.kind(),
                    depth: delivered,
                });
            }

            let kind = message.kind();
            for registration in &mut self.registrations {
                if registration.kinds.contains(&kind) {
                    trace!(listener = registration.listener.name(), %kind, "delivering message");
                    registration.listener.receive_message(&message, context);
                }
            }
            pending.extend(context.drain_outbox());
        }

        Ok(())
    }
}

impl Default for MessageBoard {
    fn default() -> Self {
        Self::new()
    }
}
