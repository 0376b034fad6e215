use std::collections::BTreeMap;

use crate::board::TileIndex;

use super::PlayerIndex;

/// Unique identifier for a live minion.
///
/// Allocated from a monotonically increasing counter and never reused once the
/// minion is committed to the battlefield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MinionId(pub u32);

impl core::fmt::Display for MinionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a species stat block in the content catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SpeciesId(pub u16);

impl core::fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "species:{}", self.0)
    }
}

/// Immutable stat block a minion is spawned from.
///
/// Benches and graveyards hold templates, never live minions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinionTemplate {
    pub species: SpeciesId,
    pub power: i32,
    pub health: i32,
    pub movement: u8,
    pub cost: u32,
}

/// A minion on the battlefield.
///
/// The stat fields start as copies of the template and may diverge during
/// play. A minion is live exactly while the registry holds it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Minion {
    pub uid: MinionId,
    pub owner: PlayerIndex,
    pub template: MinionTemplate,
    pub power: i32,
    pub health: i32,
    pub movement: u8,
    pub cost: u32,
    pub position: TileIndex,
    /// Tokens are never recycled into the graveyard when they die.
    pub is_token: bool,
}

impl Minion {
    pub fn from_template(
        uid: MinionId,
        owner: PlayerIndex,
        template: MinionTemplate,
        position: TileIndex,
    ) -> Self {
        Self {
            uid,
            owner,
            template,
            power: template.power,
            health: template.health,
            movement: template.movement,
            cost: template.cost,
            position,
            is_token: false,
        }
    }
}

/// Arena of live minions keyed by id, plus the id allocator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinionRegistry {
    minions: BTreeMap<MinionId, Minion>,
    next_id: u32,
}

impl MinionRegistry {
    pub fn new() -> Self {
        Self {
            minions: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn get(&self, id: MinionId) -> Option<&Minion> {
        self.minions.get(&id)
    }

    pub fn get_mut(&mut self, id: MinionId) -> Option<&mut Minion> {
        self.minions.get_mut(&id)
    }

    pub fn contains(&self, id: MinionId) -> bool {
        self.minions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.minions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Minion> {
        self.minions.values()
    }

    pub fn owned_by(&self, player: PlayerIndex) -> impl Iterator<Item = &Minion> {
        self.iter().filter(move |minion| minion.owner == player)
    }

    /// Id the next allocation will return.
    pub fn next_id(&self) -> MinionId {
        MinionId(self.next_id)
    }

    pub(crate) fn allocate(&mut self) -> MinionId {
        let id = MinionId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Returns an id to the allocator. Only the most recent allocation can be
    /// released, and only while no minion holds it.
    pub(crate) fn release(&mut self, id: MinionId) -> bool {
        if id.0 + 1 == self.next_id && !self.minions.contains_key(&id) {
            self.next_id = id.0;
            true
        } else {
            false
        }
    }

    pub(crate) fn insert(&mut self, minion: Minion) {
        self.minions.insert(minion.uid, minion);
    }

    pub(crate) fn remove(&mut self, id: MinionId) -> Option<Minion> {
        self.minions.remove(&id)
    }
}

impl Default for MinionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
