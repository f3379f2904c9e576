use crate::types::{GameState, Symbol};

/// Everything a render sink needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub state: GameState,
    /// Highlighted pad, if any
    pub active: Option<Symbol>,
    pub input_enabled: bool,
    pub pad_count: u8,
    /// Current round, 1-based (0 before the first round)
    pub round: u32,
    pub sequence_len: usize,
    /// Longest correct run of the game that just failed
    pub longest_run: Option<usize>,
    /// Best run across restarted games in this session
    pub best_run: usize,
}

impl GameSnapshot {
    pub fn is_active(&self, symbol: Symbol) -> bool {
        self.active == Some(symbol)
    }

    pub fn game_over(&self) -> bool {
        matches!(self.state, GameState::Terminating | GameState::GameOver)
    }
}
