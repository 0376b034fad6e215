use arrayvec::ArrayVec;

use crate::config::GameConfig;

use super::{MinionTemplate, SpeciesId, StateError};

/// Seat of a player in the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerIndex {
    #[strum(to_string = "player 1")]
    Player1,
    #[strum(to_string = "player 2")]
    Player2,
}

impl PlayerIndex {
    pub const ALL: [PlayerIndex; 2] = [PlayerIndex::Player1, PlayerIndex::Player2];

    pub const fn ordinal(self) -> usize {
        match self {
            PlayerIndex::Player1 => 0,
            PlayerIndex::Player2 => 1,
        }
    }

    pub const fn opponent(self) -> Self {
        match self {
            PlayerIndex::Player1 => PlayerIndex::Player2,
            PlayerIndex::Player2 => PlayerIndex::Player1,
        }
    }
}

/// Host-assigned identity of the account occupying a seat.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Species a player brings to the match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deck {
    pub id: u32,
    pub minions: Vec<SpeciesId>,
}

pub type Bench = ArrayVec<MinionTemplate, { GameConfig::MAX_BENCH_SIZE }>;
pub type Graveyard = ArrayVec<MinionTemplate, { GameConfig::GRAVEYARD_SIZE }>;

/// Per-player economy: resources, bench and graveyard.
///
/// The bench and graveyard are bounded queues of templates; capacity is
/// enforced by their types.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub id: PlayerId,
    pub index: PlayerIndex,
    pub deck: Deck,
    pub resource_pool: u32,
    pub bench: Bench,
    pub graveyard: Graveyard,
}

impl PlayerState {
    pub fn new(id: PlayerId, index: PlayerIndex, deck: Deck) -> Self {
        Self {
            id,
            index,
            deck,
            resource_pool: 0,
            bench: Bench::new(),
            graveyard: Graveyard::new(),
        }
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.resource_pool >= cost
    }

    /// Removes the template at `index`, shifting later entries forward.
    pub fn bench_take(&mut self, index: usize) -> Result<MinionTemplate, StateError> {
        let len = self.bench.len();
        self.bench
            .pop_at(index)
            .ok_or(StateError::BenchSlotEmpty { index, len })
    }

    /// Appends a template to the back of the bench.
    pub fn bench_put(&mut self, template: MinionTemplate) -> Result<(), StateError> {
        self.bench
            .try_push(template)
            .map_err(|_| StateError::BenchFull(self.index))
    }

    /// Re-inserts a template at a specific bench slot.
    pub(crate) fn bench_restore(
        &mut self,
        index: usize,
        template: MinionTemplate,
    ) -> Result<(), StateError> {
        let len = self.bench.len();
        if index > len {
            return Err(StateError::BenchSlotEmpty { index, len });
        }
        self.bench
            .try_insert(index, template)
            .map_err(|_| StateError::BenchFull(self.index))
    }

    /// Appends a template to the back of the graveyard.
    pub fn graveyard_put(&mut self, template: MinionTemplate) -> Result<(), StateError> {
        self.graveyard
            .try_push(template)
            .map_err(|_| StateError::GraveyardFull(self.index))
    }

    /// Removes the template at `index`, shifting later entries forward.
    pub fn graveyard_take(&mut self, index: usize) -> Result<MinionTemplate, StateError> {
        let len = self.graveyard.len();
        self.graveyard
            .pop_at(index)
            .ok_or(StateError::GraveyardSlotEmpty { index, len })
    }

    /// Removes the oldest graveyard entry.
    pub fn graveyard_dequeue(&mut self) -> Option<MinionTemplate> {
        self.graveyard.pop_at(0)
    }
}
