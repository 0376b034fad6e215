use crate::action::ActionResult;
use crate::env::BattleEnv;
use crate::event::GameEvent;
use crate::state::{Phase, PlayerIndex};

use super::GameEngine;

/// Turn and timer methods for GameEngine.
impl<'a> GameEngine<'a> {
    /// Returns the player whose action is awaited.
    pub fn current_player(&self) -> PlayerIndex {
        self.state.current_player
    }

    /// Advances the turn timer by one second.
    ///
    /// An expired timer is handed to the resolution hook and then restarts at
    /// the configured duration. Expiry does not pass the turn.
    pub fn tick(&mut self, env: BattleEnv<'_>) -> Vec<GameEvent> {
        if self.state.timer_seconds > 0 {
            self.state.timer_seconds -= 1;
            return Vec::new();
        }
        let events = env.hook().on_timer_expired(self.state);
        self.state.timer_seconds = env.config().turn_duration_secs;
        events
    }

    /// Decides whether a committed action ends the turn.
    ///
    /// With continued movement enabled, a plain move that leaves budget over
    /// keeps the turn open for the same minion.
    pub(super) fn conclude_turn(&mut self, env: &BattleEnv<'_>, result: &ActionResult) {
        if env.config().continued_movement {
            if let ActionResult::Move(outcome) = result {
                if outcome.engaged.is_none() && outcome.remaining > 0 {
                    self.state.phase = Phase::AwaitingContinuedMovement {
                        minion: outcome.minion,
                        remaining: outcome.remaining,
                    };
                    return;
                }
            }
        }
        self.end_turn(env);
    }

    /// Passes the turn to the opponent and refills their resource pool.
    fn end_turn(&mut self, env: &BattleEnv<'_>) {
        let next = self.state.current_player.opponent();
        self.state.current_player = next;
        self.state.turns_taken += 1;
        self.state.phase = Phase::AwaitingAnyAction;
        self.state.player_mut(next).resource_pool = env.config().turn_resources(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::config::GameConfig;
    use crate::engine::ResolutionHook;
    use crate::state::{Deck, GameState, MinionId, PlayerId, PlayerState};

    fn state(timer: u32) -> GameState {
        let players = [
            PlayerState::new(PlayerId::new("1"), PlayerIndex::Player1, Deck::default()),
            PlayerState::new(PlayerId::new("2"), PlayerIndex::Player2, Deck::default()),
        ];
        GameState::new(Board::reference(), players, timer)
    }

    #[test]
    fn turns_alternate_and_count() {
        let config = GameConfig::default().with_base_resources(3, 2);
        let env = BattleEnv::new(&config);
        let mut state = state(45);
        let mut engine = GameEngine::new(&mut state);

        engine.end_turn(&env);
        assert_eq!(engine.current_player(), PlayerIndex::Player2);
        assert_eq!(engine.state().player(PlayerIndex::Player2).resource_pool, 5);

        engine.end_turn(&env);
        assert_eq!(engine.current_player(), PlayerIndex::Player1);
        assert_eq!(engine.state().player(PlayerIndex::Player1).resource_pool, 3);
        assert_eq!(engine.state().turns_taken, 2);
    }

    #[test]
    fn timer_is_not_reset_by_turn_change() {
        let config = GameConfig::default();
        let env = BattleEnv::new(&config);
        let mut state = state(10);
        let mut engine = GameEngine::new(&mut state);

        engine.tick(env);
        engine.end_turn(&env);
        assert_eq!(engine.state().timer_seconds, 9);
    }

    #[test]
    fn engaged_or_exhausted_moves_end_the_turn() {
        let config = GameConfig::default().with_continued_movement(true);
        let env = BattleEnv::new(&config);
        let mut state = state(45);
        let mut engine = GameEngine::new(&mut state);
        let outcome = |engaged, remaining| {
            ActionResult::Move(crate::action::MoveOutcome {
                minion: MinionId(1),
                engaged,
                remaining,
            })
        };

        engine.conclude_turn(&env, &outcome(Some(MinionId(2)), 2));
        assert_eq!(engine.current_player(), PlayerIndex::Player2);

        engine.conclude_turn(&env, &outcome(None, 0));
        assert_eq!(engine.current_player(), PlayerIndex::Player1);

        engine.conclude_turn(&env, &outcome(None, 1));
        assert_eq!(engine.current_player(), PlayerIndex::Player1);
        assert_eq!(engine.state().phase.pending_minion(), Some(MinionId(1)));
    }

    #[test]
    fn expired_timer_consults_the_hook() {
        struct Alarm;
        impl ResolutionHook for Alarm {
            fn on_timer_expired(&self, state: &mut GameState) -> Vec<GameEvent> {
                vec![GameEvent::InputRequired {
                    player: state.current_player,
                }]
            }
        }

        let config = GameConfig::default().with_turn_duration(30);
        let env = BattleEnv::new(&config).with_hook(&Alarm);
        let mut state = state(0);
        let mut engine = GameEngine::new(&mut state);

        let events = engine.tick(env);
        assert_eq!(
            events,
            vec![GameEvent::InputRequired {
                player: PlayerIndex::Player1
            }]
        );
        assert_eq!(engine.state().timer_seconds, 30);
    }
}
