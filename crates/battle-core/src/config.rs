/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    /// Maximum number of messages a single dispatch may deliver, including
    /// follow-ups queued by listeners. A chain longer than this indicates
    /// listeners feeding each other in a loop.
    pub max_message_chain: usize,

    /// Initial value of the training-wheels challenge modifier.
    pub training_wheels: bool,
}

impl BattleConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_MESSAGE_CHAIN: usize = 16;

    pub fn new() -> Self {
        Self {
            max_message_chain: Self::DEFAULT_MAX_MESSAGE_CHAIN,
            training_wheels: false,
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
