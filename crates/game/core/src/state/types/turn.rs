/// Turn bookkeeping for the battlefield.
///
/// The counter only moves forward; units compare their `last_turn` stamp
/// against it to decide whether their AP pool is due a refill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Current turn number, starting at 0.
    pub turn: u64,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances to the next turn and returns the new turn number.
    pub fn advance(&mut self) -> u64 {
        self.turn += 1;
        self.turn
    }
}
