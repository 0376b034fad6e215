/// Match rules: compile-time capacities plus the tunables a host may override.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Seconds on the turn timer; the timer is reset to this value when it
    /// reaches zero.
    pub turn_duration_secs: u32,

    /// Resource pool granted to Player 1 at the start of each of their turns.
    pub base_resources: u32,

    /// Extra resources granted per player index, so Player 2 starts each turn
    /// with `base_resources + second_player_bonus`.
    pub second_player_bonus: u32,

    /// Movement a freshly spawned minion loses for the move that follows the
    /// spawn.
    pub spawn_movement_tax: u8,

    /// Enables the multi-step movement variant: a move that leaves movement
    /// unspent keeps the turn open for the same minion.
    pub continued_movement: bool,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const BOARD_WIDTH: usize = 5;
    pub const BOARD_HEIGHT: usize = 5;
    /// Largest movement budget any minion can have. Route-finding relies on
    /// paths of this length being unique on the reference board.
    pub const MAX_MOVEMENT: u8 = 3;
    pub const MAX_BENCH_SIZE: usize = 6;
    pub const GRAVEYARD_SIZE: usize = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TURN_DURATION_SECS: u32 = 45;
    pub const DEFAULT_BASE_RESOURCES: u32 = 1;
    pub const DEFAULT_SECOND_PLAYER_BONUS: u32 = 1;
    pub const DEFAULT_SPAWN_MOVEMENT_TAX: u8 = 1;

    pub fn new() -> Self {
        Self {
            turn_duration_secs: Self::DEFAULT_TURN_DURATION_SECS,
            base_resources: Self::DEFAULT_BASE_RESOURCES,
            second_player_bonus: Self::DEFAULT_SECOND_PLAYER_BONUS,
            spawn_movement_tax: Self::DEFAULT_SPAWN_MOVEMENT_TAX,
            continued_movement: false,
        }
    }

    #[must_use]
    pub fn with_turn_duration(mut self, secs: u32) -> Self {
        self.turn_duration_secs = secs;
        self
    }

    #[must_use]
    pub fn with_base_resources(mut self, base: u32, second_player_bonus: u32) -> Self {
        self.base_resources = base;
        self.second_player_bonus = second_player_bonus;
        self
    }

    #[must_use]
    pub fn with_spawn_movement_tax(mut self, tax: u8) -> Self {
        self.spawn_movement_tax = tax;
        self
    }

    #[must_use]
    pub fn with_continued_movement(mut self, enabled: bool) -> Self {
        self.continued_movement = enabled;
        self
    }

    /// Resource pool a player starts their turn with.
    pub fn turn_resources(&self, player: crate::state::PlayerIndex) -> u32 {
        self.base_resources
            .saturating_add(self.second_player_bonus.saturating_mul(player.ordinal() as u32))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PlayerIndex;

    #[test]
    fn second_player_gets_one_extra_resource_by_default() {
        let config = GameConfig::default();
        assert_eq!(config.turn_resources(PlayerIndex::Player1), 1);
        assert_eq!(config.turn_resources(PlayerIndex::Player2), 2);
    }

    #[test]
    fn builders_override_defaults() {
        let config = GameConfig::new()
            .with_turn_duration(30)
            .with_base_resources(3, 0)
            .with_continued_movement(true);
        assert_eq!(config.turn_duration_secs, 30);
        assert_eq!(config.turn_resources(PlayerIndex::Player2), 3);
        assert!(config.continued_movement);
        assert_eq!(config.spawn_movement_tax, 1);
    }
}
