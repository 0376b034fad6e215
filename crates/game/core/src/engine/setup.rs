//! Match setup: seating both players and filling their benches.

use crate::board::{Board, TileKind};
use crate::config::GameConfig;
use crate::env::SpeciesOracle;
use crate::error::{ErrorSeverity, GameError};
use crate::event::GameEvent;
use crate::state::{Deck, GameState, PlayerId, PlayerIndex, PlayerState, SpeciesId};

/// A player joining the match together with the deck they bring.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seat {
    pub id: PlayerId,
    pub deck: Deck,
}

impl Seat {
    pub fn new(id: PlayerId, deck: Deck) -> Self {
        Self { id, deck }
    }
}

/// Freshly built match and the events announcing it.
#[derive(Clone, Debug)]
pub struct MatchStart {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("player {0} occupies both seats")]
    DuplicatePlayer(PlayerId),

    #[error("{player} brings unknown {species}")]
    UnknownSpecies {
        player: PlayerIndex,
        species: SpeciesId,
    },

    #[error("{player} brings {len} minions, the bench holds {max}")]
    DeckTooLarge {
        player: PlayerIndex,
        len: usize,
        max: usize,
    },

    #[error("board has no spawn point for {0}")]
    NoSpawnPoint(PlayerIndex),
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            SetupError::DuplicatePlayer(_) => "SETUP_DUPLICATE_PLAYER",
            SetupError::UnknownSpecies { .. } => "SETUP_UNKNOWN_SPECIES",
            SetupError::DeckTooLarge { .. } => "SETUP_DECK_TOO_LARGE",
            SetupError::NoSpawnPoint(_) => "SETUP_NO_SPAWN_POINT",
        }
    }
}

/// Builds the opening state: benches filled from the decks in deck order,
/// the first player's turn with their resources granted, the timer full.
pub fn new_match(
    config: &GameConfig,
    board: Board,
    seats: [Seat; 2],
    species: &dyn SpeciesOracle,
) -> Result<MatchStart, SetupError> {
    let [first, second] = seats;
    if first.id == second.id {
        return Err(SetupError::DuplicatePlayer(first.id));
    }

    for index in PlayerIndex::ALL {
        let has_spawn = board
            .iter()
            .any(|tile| tile.kind == TileKind::Spawn && tile.owner == Some(index));
        if !has_spawn {
            return Err(SetupError::NoSpawnPoint(index));
        }
    }

    let players = [
        seat_player(first, PlayerIndex::Player1, species)?,
        seat_player(second, PlayerIndex::Player2, species)?,
    ];

    let mut state = GameState::new(board, players, config.turn_duration_secs);
    for index in PlayerIndex::ALL {
        state.player_mut(index).resource_pool = config.turn_resources(index);
    }

    Ok(MatchStart {
        events: vec![GameEvent::InputRequired {
            player: state.current_player,
        }],
        state,
    })
}

fn seat_player(
    seat: Seat,
    index: PlayerIndex,
    species: &dyn SpeciesOracle,
) -> Result<PlayerState, SetupError> {
    let len = seat.deck.minions.len();
    if len > GameConfig::MAX_BENCH_SIZE {
        return Err(SetupError::DeckTooLarge {
            player: index,
            len,
            max: GameConfig::MAX_BENCH_SIZE,
        });
    }

    let templates = seat
        .deck
        .minions
        .iter()
        .map(|id| {
            species.template(*id).ok_or(SetupError::UnknownSpecies {
                player: index,
                species: *id,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut player = PlayerState::new(seat.id, index, seat.deck);
    player.bench.extend(templates);
    Ok(player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MinionTemplate;

    const SPECIES: [MinionTemplate; 1] = [MinionTemplate {
        species: SpeciesId(7),
        power: 2,
        health: 3,
        movement: 1,
        cost: 2,
    }];

    fn seat(id: &str, minions: Vec<SpeciesId>) -> Seat {
        Seat::new(PlayerId::new(id), Deck { id: 1, minions })
    }

    fn build(seats: [Seat; 2]) -> Result<MatchStart, SetupError> {
        new_match(&GameConfig::default(), Board::reference(), seats, &SPECIES)
    }

    #[test]
    fn benches_follow_deck_order() {
        let start = build([
            seat("1", vec![SpeciesId(7), SpeciesId(7)]),
            seat("2", vec![SpeciesId(7)]),
        ])
        .unwrap();

        assert_eq!(start.state.player(PlayerIndex::Player1).bench.len(), 2);
        assert_eq!(start.state.player(PlayerIndex::Player2).bench.len(), 1);
        assert_eq!(start.state.player(PlayerIndex::Player1).resource_pool, 1);
        assert_eq!(start.state.player(PlayerIndex::Player2).resource_pool, 2);
        assert_eq!(start.state.timer_seconds, 45);
        assert_eq!(start.state.current_player, PlayerIndex::Player1);
        assert!(start.state.minions.is_empty());
        assert_eq!(
            start.events,
            vec![GameEvent::InputRequired {
                player: PlayerIndex::Player1
            }]
        );
    }

    #[test]
    fn rejects_bad_seating() {
        assert_eq!(
            build([seat("1", vec![]), seat("1", vec![])]).unwrap_err(),
            SetupError::DuplicatePlayer(PlayerId::new("1"))
        );
        assert_eq!(
            build([seat("1", vec![]), seat("2", vec![SpeciesId(8)])]).unwrap_err(),
            SetupError::UnknownSpecies {
                player: PlayerIndex::Player2,
                species: SpeciesId(8)
            }
        );
        assert!(matches!(
            build([seat("1", vec![SpeciesId(7); 7]), seat("2", vec![])]),
            Err(SetupError::DeckTooLarge { len: 7, .. })
        ));
    }

    #[test]
    fn board_needs_spawn_points_for_both_players() {
        let board = Board::from_rows(&["S.B", "...", "..b"]).unwrap();
        let result = new_match(
            &GameConfig::default(),
            board,
            [seat("1", vec![]), seat("2", vec![])],
            &SPECIES,
        );
        assert!(matches!(result, Err(SetupError::NoSpawnPoint(PlayerIndex::Player2))));
    }
}
