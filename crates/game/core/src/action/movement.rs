use crate::action::ActionTransition;
use crate::board::TileIndex;
use crate::env::BattleEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::event::GameEvent;
use crate::path::find_path;
use crate::state::{GameState, Minion, MinionId, Phase, PlayerIndex, StateError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("tile {0} is out of bounds")]
    OutOfBounds(TileIndex),

    #[error("no minion at tile {0}")]
    NoMinion(TileIndex),

    #[error("minion at tile {tile} belongs to {owner}")]
    NotOwner { tile: TileIndex, owner: PlayerIndex },

    #[error("only {pending} may continue moving this turn (requested {requested})")]
    NotPendingMinion {
        pending: MinionId,
        requested: MinionId,
    },

    #[error("no route from {from} to {to} within {budget} steps")]
    NoPath {
        from: TileIndex,
        to: TileIndex,
        budget: u8,
    },

    #[error("route is blocked at tile {tile} by {occupant}")]
    Blocked { tile: TileIndex, occupant: MinionId },

    #[error("destination {tile} holds friendly minion {occupant}")]
    FriendlyAtDestination { tile: TileIndex, occupant: MinionId },

    #[error(transparent)]
    State(#[from] StateError),
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        use MoveError::*;
        match self {
            OutOfBounds(_) | NoMinion(_) | NotOwner { .. } => ErrorSeverity::Validation,
            NotPendingMinion { .. } => ErrorSeverity::Validation,
            NoPath { .. } | Blocked { .. } | FriendlyAtDestination { .. } => {
                ErrorSeverity::Recoverable
            }
            State(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use MoveError::*;
        match self {
            OutOfBounds(_) => "MOVE_OUT_OF_BOUNDS",
            NoMinion(_) => "MOVE_NO_MINION",
            NotOwner { .. } => "MOVE_NOT_OWNER",
            NotPendingMinion { .. } => "MOVE_NOT_PENDING_MINION",
            NoPath { .. } => "MOVE_NO_PATH",
            Blocked { .. } => "MOVE_BLOCKED",
            FriendlyAtDestination { .. } => "MOVE_FRIENDLY_AT_DESTINATION",
            State(error) => error.error_code(),
        }
    }
}

/// Relocates one of the actor's minions along the unique route to `to`.
///
/// Ending on an enemy is an attack-move: the minion stops on the last tile
/// before the enemy and the engagement is handed to the resolution hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor: PlayerIndex,
    pub from: TileIndex,
    pub to: TileIndex,
}

/// What a completed move did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveOutcome {
    pub minion: MinionId,
    /// Enemy the minion stopped in front of, if this was an attack-move.
    pub engaged: Option<MinionId>,
    /// Movement budget left after the route, counting the attack step.
    pub remaining: u8,
}

/// Validated route for a single minion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MovePlan {
    minion: MinionId,
    from: TileIndex,
    path: Vec<TileIndex>,
    target: Option<MinionId>,
    budget: u8,
}

impl MoveAction {
    pub fn new(actor: PlayerIndex, from: TileIndex, to: TileIndex) -> Self {
        Self { actor, from, to }
    }

    fn plan(&self, state: &GameState) -> Result<MovePlan, MoveError> {
        let minion = mover(state, self.actor, self.from)?;
        let budget = match state.phase {
            Phase::AwaitingAnyAction => minion.movement,
            Phase::AwaitingContinuedMovement { minion: pending, remaining } => {
                if pending != minion.uid {
                    return Err(MoveError::NotPendingMinion {
                        pending,
                        requested: minion.uid,
                    });
                }
                remaining
            }
        };
        plan_route(state, minion, self.to, budget)
    }
}

impl ActionTransition for MoveAction {
    type Error = MoveError;
    type Result = MoveOutcome;

    fn pre_validate(&self, state: &GameState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        self.plan(state).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &BattleEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<Self::Result, Self::Error> {
        let plan = self.plan(state)?;
        walk(state, env, plan, events)
    }
}

/// Looks up the actor's minion standing on `from`.
pub(crate) fn mover(
    state: &GameState,
    actor: PlayerIndex,
    from: TileIndex,
) -> Result<&Minion, MoveError> {
    if !state.board.contains(from) {
        return Err(MoveError::OutOfBounds(from));
    }
    let minion = state.minion_at(from).ok_or(MoveError::NoMinion(from))?;
    if minion.owner != actor {
        return Err(MoveError::NotOwner {
            tile: from,
            owner: minion.owner,
        });
    }
    Ok(minion)
}

/// Checks the route for `minion` to `to` within `budget` steps.
///
/// Every tile before the destination must be empty. The destination may be
/// empty or hold an enemy, never a friend.
pub(crate) fn plan_route(
    state: &GameState,
    minion: &Minion,
    to: TileIndex,
    budget: u8,
) -> Result<MovePlan, MoveError> {
    if !state.board.contains(to) {
        return Err(MoveError::OutOfBounds(to));
    }
    let from = minion.position;
    let path = find_path(&state.board, from, to, u32::from(budget));
    let Some((destination, route)) = path.split_last() else {
        return Err(MoveError::NoPath { from, to, budget });
    };

    if let Some((tile, occupant)) = route
        .iter()
        .find_map(|tile| state.board.occupant(*tile).map(|occupant| (*tile, occupant)))
    {
        return Err(MoveError::Blocked { tile, occupant });
    }

    let target = match state.minion_at(*destination) {
        Some(other) if other.owner == minion.owner => {
            return Err(MoveError::FriendlyAtDestination {
                tile: *destination,
                occupant: other.uid,
            });
        }
        Some(enemy) => Some(enemy.uid),
        None => None,
    };

    Ok(MovePlan {
        minion: minion.uid,
        from,
        path,
        target,
        budget,
    })
}

/// Applies a plan hop by hop, emitting one event per hop.
pub(crate) fn walk(
    state: &mut GameState,
    env: &BattleEnv<'_>,
    plan: MovePlan,
    events: &mut Vec<GameEvent>,
) -> Result<MoveOutcome, MoveError> {
    let steps = match plan.target {
        Some(_) => &plan.path[..plan.path.len() - 1],
        None => &plan.path[..],
    };

    let mut from = plan.from;
    for &to in steps {
        state.relocate(plan.minion, to)?;
        events.push(GameEvent::MinionMoved {
            minion: plan.minion,
            from,
            to,
        });
        from = to;
    }

    if let Some(defender) = plan.target {
        events.extend(env.hook().resolve_engagement(state, plan.minion, defender));
    }

    let spent = u8::try_from(plan.path.len()).unwrap_or(u8::MAX);
    Ok(MoveOutcome {
        minion: plan.minion,
        engaged: plan.target,
        remaining: plan.budget.saturating_sub(spent),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::config::GameConfig;
    use crate::engine::ResolutionHook;
    use crate::state::{Deck, MinionTemplate, PlayerId, PlayerState, SpeciesId};

    fn template(movement: u8) -> MinionTemplate {
        MinionTemplate {
            species: SpeciesId(1),
            power: 1,
            health: 1,
            movement,
            cost: 0,
        }
    }

    fn state() -> GameState {
        let players = [
            PlayerState::new(PlayerId::new("1"), PlayerIndex::Player1, Deck::default()),
            PlayerState::new(PlayerId::new("2"), PlayerIndex::Player2, Deck::default()),
        ];
        GameState::new(Board::reference(), players, 45)
    }

    fn put(state: &mut GameState, owner: PlayerIndex, tile: i32, movement: u8) -> MinionId {
        state
            .spawn_token(owner, template(movement), TileIndex(tile))
            .unwrap()
    }

    fn apply(state: &mut GameState, action: MoveAction) -> (Result<MoveOutcome, MoveError>, Vec<GameEvent>) {
        let config = GameConfig::default();
        let env = BattleEnv::new(&config);
        let mut events = Vec::new();
        let result = action
            .pre_validate(state, &env)
            .and_then(|()| action.apply(state, &env, &mut events));
        (result, events)
    }

    #[test]
    fn move_emits_one_event_per_hop() {
        let mut state = state();
        let uid = put(&mut state, PlayerIndex::Player1, 0, 2);

        let (result, events) = apply(
            &mut state,
            MoveAction::new(PlayerIndex::Player1, TileIndex(0), TileIndex(10)),
        );
        let outcome = result.unwrap();
        assert_eq!(outcome.remaining, 0);
        assert_eq!(outcome.engaged, None);
        assert_eq!(
            events,
            vec![
                GameEvent::MinionMoved {
                    minion: uid,
                    from: TileIndex(0),
                    to: TileIndex(5)
                },
                GameEvent::MinionMoved {
                    minion: uid,
                    from: TileIndex(5),
                    to: TileIndex(10)
                },
            ]
        );
        assert_eq!(state.board.occupant(TileIndex(10)), Some(uid));
        assert_eq!(state.board.occupant(TileIndex(0)), None);
    }

    #[test]
    fn rejects_foreign_missing_and_out_of_range() {
        let mut state = state();
        put(&mut state, PlayerIndex::Player2, 20, 2);
        let before = state.clone();

        let cases = [
            (MoveAction::new(PlayerIndex::Player1, TileIndex(20), TileIndex(15)), "MOVE_NOT_OWNER"),
            (MoveAction::new(PlayerIndex::Player1, TileIndex(3), TileIndex(2)), "MOVE_NO_MINION"),
            (MoveAction::new(PlayerIndex::Player2, TileIndex(-4), TileIndex(2)), "MOVE_OUT_OF_BOUNDS"),
            (MoveAction::new(PlayerIndex::Player2, TileIndex(20), TileIndex(99)), "MOVE_OUT_OF_BOUNDS"),
            (MoveAction::new(PlayerIndex::Player2, TileIndex(20), TileIndex(5)), "MOVE_NO_PATH"),
            (MoveAction::new(PlayerIndex::Player2, TileIndex(20), TileIndex(20)), "MOVE_NO_PATH"),
        ];
        for (action, code) in cases {
            let (result, events) = apply(&mut state, action);
            assert_eq!(result.unwrap_err().error_code(), code);
            assert!(events.is_empty());
            assert_eq!(state, before);
        }
    }

    #[test]
    fn intermediate_tiles_must_be_free() {
        let mut state = state();
        put(&mut state, PlayerIndex::Player1, 0, 2);
        let blocker = put(&mut state, PlayerIndex::Player2, 5, 1);

        let (result, _) = apply(
            &mut state,
            MoveAction::new(PlayerIndex::Player1, TileIndex(0), TileIndex(10)),
        );
        assert_eq!(
            result,
            Err(MoveError::Blocked {
                tile: TileIndex(5),
                occupant: blocker
            })
        );
    }

    #[test]
    fn friendly_destination_is_rejected() {
        let mut state = state();
        put(&mut state, PlayerIndex::Player1, 0, 2);
        let friend = put(&mut state, PlayerIndex::Player1, 1, 1);
        let before = state.clone();

        let (result, _) = apply(
            &mut state,
            MoveAction::new(PlayerIndex::Player1, TileIndex(0), TileIndex(1)),
        );
        assert_eq!(
            result,
            Err(MoveError::FriendlyAtDestination {
                tile: TileIndex(1),
                occupant: friend
            })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn attack_move_stops_before_enemy() {
        let mut state = state();
        let attacker = put(&mut state, PlayerIndex::Player1, 0, 3);
        let defender = put(&mut state, PlayerIndex::Player2, 10, 1);

        let (result, events) = apply(
            &mut state,
            MoveAction::new(PlayerIndex::Player1, TileIndex(0), TileIndex(10)),
        );
        let outcome = result.unwrap();
        assert_eq!(outcome.engaged, Some(defender));
        assert_eq!(outcome.remaining, 1);
        assert_eq!(events.len(), 1);
        assert_eq!(state.board.occupant(TileIndex(5)), Some(attacker));
        assert_eq!(state.board.occupant(TileIndex(10)), Some(defender));
    }

    #[test]
    fn engagement_is_handed_to_the_hook() {
        struct Slay;
        impl ResolutionHook for Slay {
            fn resolve_engagement(
                &self,
                state: &mut GameState,
                _attacker: MinionId,
                defender: MinionId,
            ) -> Vec<GameEvent> {
                state
                    .kill(defender)
                    .map(|outcome| outcome.events())
                    .unwrap_or_default()
            }
        }

        let mut state = state();
        put(&mut state, PlayerIndex::Player1, 0, 1);
        let defender = put(&mut state, PlayerIndex::Player2, 1, 1);

        let config = GameConfig::default();
        let env = BattleEnv::new(&config).with_hook(&Slay);
        let mut events = Vec::new();
        let action = MoveAction::new(PlayerIndex::Player1, TileIndex(0), TileIndex(1));
        action.apply(&mut state, &env, &mut events).unwrap();

        assert_eq!(
            events,
            vec![GameEvent::MinionDied {
                minion: defender,
                tile: TileIndex(1)
            }]
        );
        assert!(!state.minions.contains(defender));
    }

    #[test]
    fn continued_movement_is_locked_to_pending_minion() {
        let mut state = state();
        let first = put(&mut state, PlayerIndex::Player1, 0, 3);
        put(&mut state, PlayerIndex::Player1, 4, 3);
        state.phase = Phase::AwaitingContinuedMovement {
            minion: first,
            remaining: 1,
        };

        let (result, _) = apply(
            &mut state,
            MoveAction::new(PlayerIndex::Player1, TileIndex(4), TileIndex(9)),
        );
        assert!(matches!(result, Err(MoveError::NotPendingMinion { .. })));

        let (result, _) = apply(
            &mut state,
            MoveAction::new(PlayerIndex::Player1, TileIndex(0), TileIndex(10)),
        );
        assert!(matches!(result, Err(MoveError::NoPath { budget: 1, .. })));

        let (result, _) = apply(
            &mut state,
            MoveAction::new(PlayerIndex::Player1, TileIndex(0), TileIndex(5)),
        );
        assert_eq!(result.map(|outcome| outcome.remaining), Ok(0));
    }
}
