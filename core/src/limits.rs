/// Battle limits to stop battles that can no longer progress

/// Turn cap used by [`crate::BattleEngine::run_full_simulation`] callers that don't pick one
pub const DEFAULT_MAX_TURNS: u32 = 100;
/// Consecutive turns without any card played before the battle is called
pub const STALEMATE_TURNS: u32 = 5;

/// Tracks consecutive idle turns across a battle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleLimits {
    pub idle_turns: u32,
    pub stalemate_turns: u32,
}

impl BattleLimits {
    pub fn new() -> Self {
        Self {
            idle_turns: 0,
            stalemate_turns: STALEMATE_TURNS,
        }
    }

    /// Record how many cards were played this turn.
    /// Returns true once the idle streak reaches the stalemate threshold.
    pub fn record_turn(&mut self, cards_played: usize) -> bool {
        if cards_played > 0 {
            self.idle_turns = 0;
        } else {
            self.idle_turns += 1;
        }
        self.is_stalemate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.idle_turns >= self.stalemate_turns
    }
}

impl Default for BattleLimits {
    fn default() -> Self {
        Self::new()
    }
}
