use crate::action::ActionTransition;
use crate::action::movement::{MoveError, MoveOutcome, mover, plan_route, walk};
use crate::board::TileIndex;
use crate::env::BattleEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::event::GameEvent;
use crate::state::{GameState, MinionId, MinionTemplate, PlayerIndex, StateError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpawnError {
    #[error("spawning is not allowed while {0} has movement pending")]
    MovementPending(MinionId),

    #[error("bench index {index} is invalid (bench holds {len})")]
    InvalidBenchIndex { index: i32, len: usize },

    #[error("spawn failed: {0}")]
    Spawn(#[from] StateError),

    #[error("move after spawn failed: {0}")]
    Move(MoveError),

    #[error("rollback failed: {0}")]
    Rollback(StateError),
}

impl GameError for SpawnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SpawnError::MovementPending(_) | SpawnError::InvalidBenchIndex { .. } => {
                ErrorSeverity::Validation
            }
            SpawnError::Spawn(error) => error.severity(),
            SpawnError::Move(error) => error.severity(),
            SpawnError::Rollback(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SpawnError::MovementPending(_) => "SPAWN_MOVEMENT_PENDING",
            SpawnError::InvalidBenchIndex { .. } => "SPAWN_INVALID_BENCH_INDEX",
            SpawnError::Spawn(error) => error.error_code(),
            SpawnError::Move(error) => error.error_code(),
            SpawnError::Rollback(_) => "SPAWN_ROLLBACK_FAILED",
        }
    }
}

/// Takes a bench template, spawns it and immediately moves it.
///
/// The three steps form one transaction: if the spawn or the move fails,
/// every effect of the earlier steps is undone before the error is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnAction {
    pub actor: PlayerIndex,
    pub bench_index: i32,
    pub spawn_point: TileIndex,
    pub move_to: TileIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnOutcome {
    pub minion: MinionId,
    pub movement: MoveOutcome,
}

impl SpawnAction {
    pub fn new(
        actor: PlayerIndex,
        bench_index: i32,
        spawn_point: TileIndex,
        move_to: TileIndex,
    ) -> Self {
        Self {
            actor,
            bench_index,
            spawn_point,
            move_to,
        }
    }

    fn bench_slot(&self, state: &GameState) -> Result<usize, SpawnError> {
        let len = state.player(self.actor).bench.len();
        usize::try_from(self.bench_index)
            .ok()
            .filter(|index| *index < len)
            .ok_or(SpawnError::InvalidBenchIndex {
                index: self.bench_index,
                len,
            })
    }

    fn travel(
        &self,
        state: &mut GameState,
        env: &BattleEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<MoveOutcome, MoveError> {
        let minion = mover(state, self.actor, self.spawn_point)?;
        let plan = plan_route(state, minion, self.move_to, minion.movement)?;
        walk(state, env, plan, events)
    }

    /// Undoes the bench removal, the spawn and its payment.
    fn rollback(
        &self,
        state: &mut GameState,
        slot: usize,
        template: MinionTemplate,
        uid: MinionId,
    ) -> Result<(), StateError> {
        state.remove_from_battle(uid)?;
        state.minions.release(uid);
        let player = state.player_mut(self.actor);
        player.resource_pool += template.cost;
        player.bench_restore(slot, template)
    }
}

impl ActionTransition for SpawnAction {
    type Error = SpawnError;
    type Result = SpawnOutcome;

    fn pre_validate(&self, state: &GameState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        if let Some(pending) = state.phase.pending_minion() {
            return Err(SpawnError::MovementPending(pending));
        }
        self.bench_slot(state).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &BattleEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<Self::Result, Self::Error> {
        let slot = self.bench_slot(state)?;
        let template = state.player_mut(self.actor).bench_take(slot)?;

        let uid = match state.spawn(self.actor, template, self.spawn_point) {
            Ok(uid) => uid,
            Err(error) => {
                state
                    .player_mut(self.actor)
                    .bench_restore(slot, template)
                    .map_err(SpawnError::Rollback)?;
                return Err(SpawnError::Spawn(error));
            }
        };

        let tax = env.config().spawn_movement_tax;
        let movement = template.movement;
        if let Some(minion) = state.minions.get_mut(uid) {
            minion.movement = movement.saturating_sub(tax);
        }

        let mut staged = vec![GameEvent::MinionSpawned {
            minion: uid,
            tile: self.spawn_point,
        }];
        match self.travel(state, env, &mut staged) {
            Ok(outcome) => {
                if let Some(minion) = state.minions.get_mut(uid) {
                    minion.movement = movement;
                }
                events.append(&mut staged);
                Ok(SpawnOutcome {
                    minion: uid,
                    movement: outcome,
                })
            }
            Err(error) => {
                self.rollback(state, slot, template, uid)
                    .map_err(SpawnError::Rollback)?;
                Err(SpawnError::Move(error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::config::GameConfig;
    use crate::state::{Deck, PlayerId, PlayerState, SpeciesId};

    fn template(species: u16, movement: u8, cost: u32) -> MinionTemplate {
        MinionTemplate {
            species: SpeciesId(species),
            power: 1,
            health: 1,
            movement,
            cost,
        }
    }

    fn state() -> GameState {
        let mut p1 = PlayerState::new(PlayerId::new("1"), PlayerIndex::Player1, Deck::default());
        p1.bench_put(template(1, 2, 1)).unwrap();
        p1.bench_put(template(2, 1, 1)).unwrap();
        p1.bench_put(template(3, 3, 2)).unwrap();
        p1.resource_pool = 1;
        let p2 = PlayerState::new(PlayerId::new("2"), PlayerIndex::Player2, Deck::default());
        GameState::new(Board::reference(), [p1, p2], 45)
    }

    fn run(state: &mut GameState, action: SpawnAction) -> (Result<SpawnOutcome, SpawnError>, Vec<GameEvent>) {
        let config = GameConfig::default();
        let env = BattleEnv::new(&config);
        let mut events = Vec::new();
        let result = action
            .pre_validate(state, &env)
            .and_then(|()| action.apply(state, &env, &mut events));
        (result, events)
    }

    #[test]
    fn spawn_then_move_commits_everything() {
        let mut state = state();
        let (result, events) = run(
            &mut state,
            SpawnAction::new(PlayerIndex::Player1, 0, TileIndex(0), TileIndex(1)),
        );
        let outcome = result.unwrap();

        assert_eq!(state.board.occupant(TileIndex(0)), None);
        assert_eq!(state.board.occupant(TileIndex(1)), Some(outcome.minion));
        let player = state.player(PlayerIndex::Player1);
        assert_eq!(player.resource_pool, 0);
        assert_eq!(player.bench.len(), 2);
        assert_eq!(player.bench[0].species, SpeciesId(2));
        // Movement tax is not persisted.
        assert_eq!(state.minions.get(outcome.minion).map(|m| m.movement), Some(2));
        assert_eq!(
            events,
            vec![
                GameEvent::MinionSpawned {
                    minion: outcome.minion,
                    tile: TileIndex(0)
                },
                GameEvent::MinionMoved {
                    minion: outcome.minion,
                    from: TileIndex(0),
                    to: TileIndex(1)
                },
            ]
        );
    }

    #[test]
    fn failed_move_rolls_back_spawn() {
        let mut state = state();
        let before = state.clone();

        // Movement 2 minus the spawn tax leaves one step: tile 2 is out of reach.
        let (result, events) = run(
            &mut state,
            SpawnAction::new(PlayerIndex::Player1, 0, TileIndex(0), TileIndex(2)),
        );
        assert!(matches!(result, Err(SpawnError::Move(MoveError::NoPath { budget: 1, .. }))));
        assert!(events.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn rollback_restores_middle_bench_slot() {
        let mut state = state();
        let before = state.clone();

        let (result, _) = run(
            &mut state,
            SpawnAction::new(PlayerIndex::Player1, 1, TileIndex(4), TileIndex(6)),
        );
        assert!(matches!(result, Err(SpawnError::Move(_))));
        assert_eq!(state, before);
    }

    #[test]
    fn failed_spawn_returns_template_to_bench() {
        let mut state = state();
        let before = state.clone();

        let (result, _) = run(
            &mut state,
            SpawnAction::new(PlayerIndex::Player1, 2, TileIndex(0), TileIndex(5)),
        );
        assert!(matches!(
            result,
            Err(SpawnError::Spawn(StateError::InsufficientResources { .. }))
        ));
        assert_eq!(state, before);

        let (result, _) = run(
            &mut state,
            SpawnAction::new(PlayerIndex::Player1, 0, TileIndex(24), TileIndex(19)),
        );
        assert!(matches!(
            result,
            Err(SpawnError::Spawn(StateError::NotASpawnPoint { .. }))
                | Err(SpawnError::Spawn(StateError::SpawnPointNotOwned { .. }))
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn bench_index_is_validated() {
        let mut state = state();
        for index in [-1, 3, i32::MAX] {
            let (result, _) = run(
                &mut state,
                SpawnAction::new(PlayerIndex::Player1, index, TileIndex(0), TileIndex(1)),
            );
            assert!(matches!(result, Err(SpawnError::InvalidBenchIndex { .. })));
        }
    }

    #[test]
    fn spawn_is_blocked_during_continued_movement() {
        let mut state = state();
        state.phase = crate::state::Phase::AwaitingContinuedMovement {
            minion: MinionId(9),
            remaining: 1,
        };
        let (result, _) = run(
            &mut state,
            SpawnAction::new(PlayerIndex::Player1, 0, TileIndex(0), TileIndex(1)),
        );
        assert_eq!(result, Err(SpawnError::MovementPending(MinionId(9))));
    }
}
