//! Match session driven by a host.
//!
//! [`BattleSession`] owns the authoritative [`GameState`] and exposes the
//! lifecycle a multiplayer host calls into: setup, a one-second tick, player
//! presence notifications and action dispatch by `(action type, payload,
//! player id)`. Every call runs to completion before the next one starts.

use battle_content::ContentBundle;
use battle_core::{
    ActionReport, BattleEnv, Command, ExecuteError, GameConfig, GameEngine, GameError, GameEvent,
    GameState, NoResolution, PlayerId, ResolutionHook, Seat, new_match,
};

use crate::api::{ActionType, MovePayload, Result, RuntimeError, SpawnPayload, decode_command};

pub struct BattleSession {
    config: GameConfig,
    state: GameState,
    hook: Box<dyn ResolutionHook>,
    events: Vec<GameEvent>,
    last_error: Option<ExecuteError>,
}

impl BattleSession {
    /// Starts a fresh match on the content's board with the given seats.
    pub fn setup(content: &ContentBundle, seats: [Seat; 2]) -> Result<Self> {
        let start = new_match(&content.config, content.board.clone(), seats, &content.catalog)?;
        tracing::info!(
            player1 = %start.state.players[0].id,
            player2 = %start.state.players[1].id,
            board = start.state.board.len(),
            "match set up"
        );
        Ok(Self {
            config: content.config.clone(),
            state: start.state,
            hook: Box::new(NoResolution),
            events: start.events,
            last_error: None,
        })
    }

    /// Seats `player` with the content deck identified by `deck`.
    pub fn seat(content: &ContentBundle, player: PlayerId, deck: u32) -> Result<Seat> {
        let found = content
            .deck(deck)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownDeck {
                player: player.clone(),
                deck,
            })?;
        Ok(Seat::new(player, found))
    }

    /// Replaces the engagement/timer hook. The default has no effect.
    #[must_use]
    pub fn with_hook(mut self, hook: impl ResolutionHook + 'static) -> Self {
        self.hook = Box::new(hook);
        self
    }

    /// Advances the turn timer by one second.
    pub fn on_tick(&mut self) -> Vec<GameEvent> {
        let env = BattleEnv::new(&self.config).with_hook(self.hook.as_ref());
        let events = GameEngine::new(&mut self.state).tick(env);
        tracing::trace!(timer = self.state.timer_seconds, "tick");
        events
    }

    pub fn on_player_joined(&self, player: &PlayerId) {
        match self.state.seat_of(player) {
            Some(seat) => tracing::info!(%player, %seat, "player joined"),
            None => tracing::info!(%player, "spectator joined"),
        }
    }

    pub fn on_player_left(&self, player: &PlayerId) {
        match self.state.seat_of(player) {
            Some(seat) => tracing::info!(%player, %seat, "player left"),
            None => tracing::info!(%player, "spectator left"),
        }
    }

    /// Dispatches a host action.
    ///
    /// Returns `Ok(true)` when the action was applied and `Ok(false)` when the
    /// rules rejected it. `Err` is reserved for input that does not name a
    /// known action or whose payload cannot be decoded.
    pub fn handle(&mut self, action_type: &str, payload: &str, player: &PlayerId) -> Result<bool> {
        let action = ActionType::parse(action_type)?;
        let command = decode_command(action, payload)?;
        Ok(self.process(player, command))
    }

    pub fn move_minion(&mut self, player: &PlayerId, payload: MovePayload) -> bool {
        self.process(player, payload.into())
    }

    pub fn spawn(&mut self, player: &PlayerId, payload: SpawnPayload) -> bool {
        self.process(player, payload.into())
    }

    pub fn end_turn(&mut self, player: &PlayerId) -> bool {
        self.process(player, Command::EndTurn)
    }

    /// Runs a decoded command and records its events.
    pub fn process(&mut self, player: &PlayerId, command: Command) -> bool {
        let turn = self.state.turns_taken;
        let env = BattleEnv::new(&self.config).with_hook(self.hook.as_ref());
        let ActionReport { result, events } =
            GameEngine::new(&mut self.state).execute(env, player, command);

        let accepted = match result {
            Ok(outcome) => {
                tracing::debug!(
                    %player,
                    action = command.as_snake_case(),
                    ?outcome,
                    "action applied"
                );
                if self.state.turns_taken != turn {
                    tracing::info!(
                        turn = self.state.turns_taken,
                        current = %self.state.current_player,
                        "turn passed"
                    );
                }
                self.last_error = None;
                true
            }
            Err(error) => {
                let action = command.as_snake_case();
                let code = error.error_code();
                if error.severity().is_internal() {
                    tracing::warn!(%player, action, code, %error, "action failed internally");
                } else {
                    tracing::debug!(%player, action, code, %error, "action rejected");
                }
                self.last_error = Some(error);
                false
            }
        };
        self.events = events;
        accepted
    }

    /// Events of the last processed action, or of the setup.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Why the last action was rejected, if it was.
    pub fn last_error(&self) -> Option<&ExecuteError> {
        self.last_error.as_ref()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Hex-encoded SHA-256 of the current state.
    pub fn state_root_hex(&self) -> Result<String> {
        Ok(hex::encode(self.state.state_root()?))
    }
}

impl std::fmt::Debug for BattleSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleSession")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_content::ContentFactory;
    use battle_core::{PlayerIndex, TileIndex};

    fn session() -> BattleSession {
        let content = ContentFactory::builtin().load_bundle().unwrap();
        let seats = [
            BattleSession::seat(&content, PlayerId::new("1"), 1).unwrap(),
            BattleSession::seat(&content, PlayerId::new("2"), 2).unwrap(),
        ];
        BattleSession::setup(&content, seats).unwrap()
    }

    #[test]
    fn unknown_deck_is_reported() {
        let content = ContentFactory::builtin().load_bundle().unwrap();
        let error = BattleSession::seat(&content, PlayerId::new("1"), 42).unwrap_err();
        assert!(matches!(error, RuntimeError::UnknownDeck { deck: 42, .. }));
    }

    #[test]
    fn malformed_input_is_an_error_not_a_rejection() {
        let mut session = session();
        let player = PlayerId::new("1");
        assert!(session.handle("teleport", "{}", &player).is_err());
        assert!(session.handle("move", "[]", &player).is_err());
        assert_eq!(
            session.events(),
            &[GameEvent::InputRequired {
                player: PlayerIndex::Player1
            }]
        );
    }

    #[test]
    fn typed_entry_points_match_json_dispatch() {
        let mut typed = session();
        let mut json = session();
        let player = PlayerId::new("1");

        let payload = SpawnPayload {
            bench_index: 0,
            spawn_point: TileIndex(4),
            move_to: TileIndex(3),
        };
        assert!(typed.spawn(&player, payload));
        assert!(
            json.handle("spawn", r#"{"benchIndex":0,"spawnPoint":4,"moveTo":3}"#, &player)
                .unwrap()
        );
        assert_eq!(typed.state(), json.state());
        assert_eq!(typed.events(), json.events());
        assert_eq!(typed.state_root_hex().unwrap(), json.state_root_hex().unwrap());
    }

    #[test]
    fn rejection_is_recorded() {
        let mut session = session();
        assert!(!session.end_turn(&PlayerId::new("1")));
        assert_eq!(
            session.last_error().map(|error| error.error_code()),
            Some("END_TURN_NOTHING_PENDING")
        );
        assert!(!session.end_turn(&PlayerId::new("2")));
        assert_eq!(
            session.last_error().map(|error| error.error_code()),
            Some("EXECUTE_NOT_CURRENT_PLAYER")
        );
    }

    #[test]
    fn tick_counts_down() {
        let mut session = session();
        assert!(session.on_tick().is_empty());
        assert_eq!(session.state().timer_seconds, 44);
    }
}
