//! Authoritative battle state representation.
//!
//! This module owns the minion registry, the per-player economy and the turn
//! bookkeeping. Runtime layers clone or query this state but mutate it
//! exclusively through the engine. The lifecycle operations here (spawn, kill,
//! token placement) keep the tile/occupant mapping and the registry in lockstep.
mod error;
mod minion;
mod player;
mod turn;

pub use error::StateError;
pub use minion::{Minion, MinionId, MinionRegistry, MinionTemplate, SpeciesId};
pub use player::{Bench, Deck, Graveyard, PlayerId, PlayerIndex, PlayerState};
pub use turn::Phase;

use arrayvec::ArrayVec;

use crate::board::{Board, TileIndex, TileKind};
use crate::event::GameEvent;

/// Canonical snapshot of the deterministic battle state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub phase: Phase,
    /// Number of completed turns since setup.
    pub turns_taken: u32,
    /// Seconds left on the turn timer.
    pub timer_seconds: u32,
    pub board: Board,
    pub players: [PlayerState; 2],
    pub minions: MinionRegistry,
    pub current_player: PlayerIndex,
}

/// Result of removing a minion from play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KillOutcome {
    pub minion: MinionId,
    pub owner: PlayerIndex,
    pub tile: TileIndex,
    /// Oldest graveyard entry that moved back onto the bench.
    pub recycled: Option<MinionTemplate>,
    /// Oldest graveyard entry that was evicted while the bench was full.
    pub dropped: Option<MinionTemplate>,
}

impl KillOutcome {
    pub fn events(&self) -> Vec<GameEvent> {
        let mut events = vec![GameEvent::MinionDied {
            minion: self.minion,
            tile: self.tile,
        }];
        if let Some(template) = self.recycled {
            events.push(GameEvent::TemplateRecycled {
                player: self.owner,
                species: template.species,
            });
        }
        events
    }
}

impl GameState {
    /// Creates a state at the start of Player 1's first turn.
    pub fn new(board: Board, players: [PlayerState; 2], timer_seconds: u32) -> Self {
        Self {
            phase: Phase::AwaitingAnyAction,
            turns_taken: 0,
            timer_seconds,
            board,
            players,
            minions: MinionRegistry::new(),
            current_player: PlayerIndex::Player1,
        }
    }

    pub fn player(&self, index: PlayerIndex) -> &PlayerState {
        &self.players[index.ordinal()]
    }

    pub fn player_mut(&mut self, index: PlayerIndex) -> &mut PlayerState {
        &mut self.players[index.ordinal()]
    }

    pub fn current(&self) -> &PlayerState {
        self.player(self.current_player)
    }

    /// Resolves a host identity to a seat.
    pub fn seat_of(&self, id: &PlayerId) -> Option<PlayerIndex> {
        self.players
            .iter()
            .find(|player| &player.id == id)
            .map(|player| player.index)
    }

    pub fn minion_at(&self, tile: TileIndex) -> Option<&Minion> {
        self.board
            .occupant(tile)
            .and_then(|id| self.minions.get(id))
    }

    /// Tiles next to `tile` holding a minion of the opposing player.
    ///
    /// Empty when `tile` itself is empty.
    pub fn adjacent_enemies(&self, tile: TileIndex) -> ArrayVec<TileIndex, 4> {
        let mut enemies = ArrayVec::new();
        let Some(owner) = self.minion_at(tile).map(|minion| minion.owner) else {
            return enemies;
        };
        for neighbour in self.board.adjacent(tile) {
            if self
                .minion_at(neighbour)
                .is_some_and(|minion| minion.owner != owner)
            {
                enemies.push(neighbour);
            }
        }
        enemies
    }

    /// Checks that `player` may spawn onto `tile`.
    pub fn check_spawn_point(&self, player: PlayerIndex, tile: TileIndex) -> Result<(), StateError> {
        let spot = self
            .board
            .tile(tile)
            .ok_or(StateError::TileOutOfBounds(tile))?;
        if spot.kind != TileKind::Spawn {
            return Err(StateError::NotASpawnPoint {
                tile,
                kind: spot.kind,
            });
        }
        if spot.owner != Some(player) {
            return Err(StateError::SpawnPointNotOwned { tile, player });
        }
        if let Some(occupant) = spot.occupant {
            return Err(StateError::TileOccupied { tile, occupant });
        }
        Ok(())
    }

    /// Puts a new minion on one of `player`'s spawn points and pays its cost.
    pub fn spawn(
        &mut self,
        player: PlayerIndex,
        template: MinionTemplate,
        at: TileIndex,
    ) -> Result<MinionId, StateError> {
        let available = self.player(player).resource_pool;
        if available < template.cost {
            return Err(StateError::InsufficientResources {
                player,
                cost: template.cost,
                available,
            });
        }
        self.check_spawn_point(player, at)?;

        let uid = self.place_new(player, template, at, false)?;
        self.player_mut(player).resource_pool -= template.cost;
        Ok(uid)
    }

    /// Puts a free token on any empty, pathable tile.
    pub fn spawn_token(
        &mut self,
        player: PlayerIndex,
        template: MinionTemplate,
        at: TileIndex,
    ) -> Result<MinionId, StateError> {
        let spot = self
            .board
            .tile(at)
            .ok_or(StateError::TileOutOfBounds(at))?;
        if !spot.is_pathable() {
            return Err(StateError::Unpathable(at));
        }
        if let Some(occupant) = spot.occupant {
            return Err(StateError::TileOccupied { tile: at, occupant });
        }
        self.place_new(player, template, at, true)
    }

    fn place_new(
        &mut self,
        player: PlayerIndex,
        template: MinionTemplate,
        at: TileIndex,
        is_token: bool,
    ) -> Result<MinionId, StateError> {
        let uid = self.minions.allocate();
        if let Err(error) = self.board.place(at, uid) {
            self.minions.release(uid);
            return Err(error.into());
        }
        let mut minion = Minion::from_template(uid, player, template, at);
        minion.is_token = is_token;
        self.minions.insert(minion);
        Ok(uid)
    }

    /// Takes a minion off the board and out of the registry without touching
    /// the graveyard.
    pub(crate) fn remove_from_battle(&mut self, id: MinionId) -> Result<Minion, StateError> {
        let position = self
            .minions
            .get(id)
            .map(|minion| minion.position)
            .ok_or(StateError::UnknownMinion(id))?;
        self.board.vacate(position, id)?;
        self.minions.remove(id).ok_or(StateError::UnknownMinion(id))
    }

    /// Moves a minion one step, keeping tile occupancy in sync.
    pub(crate) fn relocate(&mut self, id: MinionId, to: TileIndex) -> Result<(), StateError> {
        let from = self
            .minions
            .get(id)
            .map(|minion| minion.position)
            .ok_or(StateError::UnknownMinion(id))?;
        self.board.place(to, id)?;
        if let Err(error) = self.board.vacate(from, id) {
            let _ = self.board.vacate(to, id);
            return Err(error.into());
        }
        if let Some(minion) = self.minions.get_mut(id) {
            minion.position = to;
        }
        Ok(())
    }

    /// Removes a minion from play and recycles its template.
    ///
    /// Non-token templates go to the back of the owner's graveyard. When the
    /// graveyard is already full its oldest entry first returns to the bench,
    /// or is lost if the bench is full too.
    pub fn kill(&mut self, id: MinionId) -> Result<KillOutcome, StateError> {
        let minion = self.remove_from_battle(id)?;
        let mut outcome = KillOutcome {
            minion: id,
            owner: minion.owner,
            tile: minion.position,
            recycled: None,
            dropped: None,
        };
        if minion.is_token {
            return Ok(outcome);
        }

        let player = self.player_mut(minion.owner);
        if player.graveyard.is_full() {
            if let Some(oldest) = player.graveyard_dequeue() {
                match player.bench_put(oldest) {
                    Ok(()) => outcome.recycled = Some(oldest),
                    Err(_) => outcome.dropped = Some(oldest),
                }
            }
        }
        player.graveyard_put(minion.template)?;
        Ok(outcome)
    }

    /// SHA-256 over the bincode encoding of the whole state.
    #[cfg(feature = "serde")]
    pub fn state_root(&self) -> Result<[u8; 32], StateError> {
        use sha2::{Digest, Sha256};

        let bytes = bincode::serialize(self).map_err(|error| StateError::Encoding(error.to_string()))?;
        Ok(Sha256::digest(&bytes).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(species: u16, cost: u32) -> MinionTemplate {
        MinionTemplate {
            species: SpeciesId(species),
            power: 1,
            health: 2,
            movement: 2,
            cost,
        }
    }

    fn state() -> GameState {
        let players = [
            PlayerState::new(PlayerId::new("p1"), PlayerIndex::Player1, Deck::default()),
            PlayerState::new(PlayerId::new("p2"), PlayerIndex::Player2, Deck::default()),
        ];
        let mut state = GameState::new(Board::reference(), players, 45);
        state.player_mut(PlayerIndex::Player1).resource_pool = 5;
        state.player_mut(PlayerIndex::Player2).resource_pool = 5;
        state
    }

    #[test]
    fn spawn_places_minion_and_pays_cost() {
        let mut state = state();
        let uid = state
            .spawn(PlayerIndex::Player1, template(1, 2), TileIndex(0))
            .unwrap();
        assert_eq!(state.board.occupant(TileIndex(0)), Some(uid));
        assert_eq!(state.minion_at(TileIndex(0)).map(|m| m.owner), Some(PlayerIndex::Player1));
        assert_eq!(state.player(PlayerIndex::Player1).resource_pool, 3);
    }

    #[test]
    fn spawn_rejections_leave_state_untouched() {
        let mut state = state();
        let before = state.clone();

        assert!(matches!(
            state.spawn(PlayerIndex::Player1, template(1, 9), TileIndex(0)),
            Err(StateError::InsufficientResources { cost: 9, available: 5, .. })
        ));
        assert!(matches!(
            state.spawn(PlayerIndex::Player1, template(1, 1), TileIndex(1)),
            Err(StateError::NotASpawnPoint { .. })
        ));
        assert!(matches!(
            state.spawn(PlayerIndex::Player1, template(1, 1), TileIndex(20)),
            Err(StateError::SpawnPointNotOwned { .. })
        ));
        assert!(matches!(
            state.spawn(PlayerIndex::Player1, template(1, 1), TileIndex(-1)),
            Err(StateError::TileOutOfBounds(_))
        ));
        assert_eq!(state, before);

        state.spawn(PlayerIndex::Player1, template(1, 1), TileIndex(4)).unwrap();
        assert!(matches!(
            state.spawn(PlayerIndex::Player1, template(2, 1), TileIndex(4)),
            Err(StateError::TileOccupied { .. })
        ));
    }

    #[test]
    fn kill_moves_template_to_graveyard() {
        let mut state = state();
        let uid = state
            .spawn(PlayerIndex::Player1, template(3, 1), TileIndex(0))
            .unwrap();

        let outcome = state.kill(uid).unwrap();
        assert_eq!(outcome.tile, TileIndex(0));
        assert_eq!(outcome.recycled, None);
        assert!(!state.minions.contains(uid));
        assert_eq!(state.board.occupant(TileIndex(0)), None);
        let graveyard = &state.player(PlayerIndex::Player1).graveyard;
        assert_eq!(graveyard.len(), 1);
        assert_eq!(graveyard[0].species, SpeciesId(3));
        assert_eq!(
            outcome.events(),
            vec![GameEvent::MinionDied {
                minion: uid,
                tile: TileIndex(0)
            }]
        );
    }

    #[test]
    fn kill_with_full_graveyard_recycles_oldest_to_bench() {
        let mut state = state();
        {
            let player = state.player_mut(PlayerIndex::Player1);
            player.graveyard_put(template(10, 1)).unwrap();
            player.graveyard_put(template(11, 1)).unwrap();
        }
        let uid = state
            .spawn(PlayerIndex::Player1, template(12, 1), TileIndex(0))
            .unwrap();

        let outcome = state.kill(uid).unwrap();
        assert_eq!(outcome.recycled.map(|t| t.species), Some(SpeciesId(10)));
        let player = state.player(PlayerIndex::Player1);
        let graveyard: Vec<_> = player.graveyard.iter().map(|t| t.species.0).collect();
        assert_eq!(graveyard, vec![11, 12]);
        assert_eq!(player.bench.last().map(|t| t.species), Some(SpeciesId(10)));
        assert!(outcome.events().contains(&GameEvent::TemplateRecycled {
            player: PlayerIndex::Player1,
            species: SpeciesId(10)
        }));
    }

    #[test]
    fn kill_with_full_graveyard_and_full_bench_drops_oldest() {
        let mut state = state();
        {
            let player = state.player_mut(PlayerIndex::Player1);
            for species in 0..6 {
                player.bench_put(template(species, 1)).unwrap();
            }
            player.graveyard_put(template(10, 1)).unwrap();
            player.graveyard_put(template(11, 1)).unwrap();
        }
        let uid = state
            .spawn(PlayerIndex::Player1, template(12, 1), TileIndex(4))
            .unwrap();

        let outcome = state.kill(uid).unwrap();
        assert_eq!(outcome.recycled, None);
        assert_eq!(outcome.dropped.map(|t| t.species), Some(SpeciesId(10)));
        let player = state.player(PlayerIndex::Player1);
        assert_eq!(player.bench.len(), 6);
        let graveyard: Vec<_> = player.graveyard.iter().map(|t| t.species.0).collect();
        assert_eq!(graveyard, vec![11, 12]);
    }

    #[test]
    fn tokens_are_not_recycled() {
        let mut state = state();
        let token = state
            .spawn_token(PlayerIndex::Player2, template(7, 3), TileIndex(12))
            .unwrap();
        assert_eq!(state.player(PlayerIndex::Player2).resource_pool, 5);
        assert!(state.minions.get(token).is_some_and(|m| m.is_token));
        assert!(matches!(
            state.spawn_token(PlayerIndex::Player2, template(7, 3), TileIndex(6)),
            Err(StateError::Unpathable(_))
        ));

        state.kill(token).unwrap();
        assert!(state.player(PlayerIndex::Player2).graveyard.is_empty());
    }

    #[test]
    fn killing_unknown_minion_fails() {
        let mut state = state();
        assert_eq!(state.kill(MinionId(42)), Err(StateError::UnknownMinion(MinionId(42))));
    }

    #[test]
    fn adjacent_enemies_ignores_friends() {
        let mut state = state();
        state.spawn_token(PlayerIndex::Player1, template(1, 0), TileIndex(12)).unwrap();
        state.spawn_token(PlayerIndex::Player1, template(1, 0), TileIndex(11)).unwrap();
        state.spawn_token(PlayerIndex::Player2, template(1, 0), TileIndex(13)).unwrap();
        state.spawn_token(PlayerIndex::Player2, template(1, 0), TileIndex(17)).unwrap();

        assert_eq!(state.adjacent_enemies(TileIndex(12)).as_slice(), &[TileIndex(17), TileIndex(13)]);
        assert!(state.adjacent_enemies(TileIndex(0)).is_empty());
    }

    #[test]
    fn relocate_keeps_occupancy_in_sync() {
        let mut state = state();
        let uid = state
            .spawn(PlayerIndex::Player1, template(1, 1), TileIndex(0))
            .unwrap();
        state.relocate(uid, TileIndex(5)).unwrap();
        assert_eq!(state.board.occupant(TileIndex(0)), None);
        assert_eq!(state.board.occupant(TileIndex(5)), Some(uid));
        assert_eq!(state.minions.get(uid).map(|m| m.position), Some(TileIndex(5)));
    }

    #[test]
    fn seat_lookup_by_player_id() {
        let state = state();
        assert_eq!(state.seat_of(&PlayerId::new("p2")), Some(PlayerIndex::Player2));
        assert_eq!(state.seat_of(&PlayerId::new("ghost")), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn state_root_tracks_changes() {
        let mut state = state();
        let before = state.state_root().unwrap();
        assert_eq!(before, state.clone().state_root().unwrap());
        assert_eq!(hex::encode(before).len(), 64);

        state.timer_seconds -= 1;
        assert_ne!(before, state.state_root().unwrap());
    }
}
