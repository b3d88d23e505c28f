//! Registry of running games

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use checkers_core::{Color, Grid, Message, Move, RuleSet};
use rustc_hash::FxHashMap;

use crate::session::{GameId, GameSession, SessionError};

/// Shared handle to one game. Holding the lock serializes moves on its board.
pub type SharedSession = Arc<Mutex<GameSession>>;

/// All games currently being played
pub struct GameRegistry {
    games: RwLock<FxHashMap<GameId, SharedSession>>,
    /// Id of the last game made, incremented before creating a new game
    last_id: AtomicU64,
    default_rules: RuleSet,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::with_rules(RuleSet::default())
    }

    /// Registry whose new games use `rules` unless told otherwise
    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            games: RwLock::new(FxHashMap::default()),
            last_id: AtomicU64::new(0),
            default_rules: rules,
        }
    }

    /// Start a game between two players
    pub fn new_game(&self, red_player: &str, white_player: &str) -> Result<GameId, SessionError> {
        self.new_game_with_rules(red_player, white_player, self.default_rules.clone())
    }

    pub fn new_game_with_rules(
        &self,
        red_player: &str,
        white_player: &str,
        rules: RuleSet,
    ) -> Result<GameId, SessionError> {
        let id = self.last_id.fetch_add(1, Ordering::Relaxed) + 1;
        let session = GameSession::new(id, red_player, white_player, rules);
        self.games
            .write()
            .map_err(|_| SessionError::LockPoisoned)?
            .insert(id, Arc::new(Mutex::new(session)));
        tracing::info!(game = id, red = red_player, white = white_player, "game created");
        Ok(id)
    }

    /// Handle to the game with the given id
    pub fn get(&self, id: GameId) -> Result<SharedSession, SessionError> {
        self.games
            .read()
            .map_err(|_| SessionError::LockPoisoned)?
            .get(&id)
            .cloned()
            .ok_or(SessionError::UnknownGame(id))
    }

    /// Game a player is currently seated at, lowest id first
    pub fn game_of(&self, player: &str) -> Result<Option<GameId>, SessionError> {
        // Session locks are only taken after the map lock is released
        let mut sessions: Vec<(GameId, SharedSession)> = self
            .games
            .read()
            .map_err(|_| SessionError::LockPoisoned)?
            .iter()
            .map(|(&id, session)| (id, Arc::clone(session)))
            .collect();
        sessions.sort_unstable_by_key(|(id, _)| *id);

        for (id, session) in sessions {
            let session = session.lock().map_err(|_| SessionError::LockPoisoned)?;
            if session.color_of(player).is_some() {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    /// Submit a move to a game
    pub fn submit_move(&self, id: GameId, color: Color, mv: Move) -> Result<Message, SessionError> {
        let session = self.get(id)?;
        let mut session = session.lock().map_err(|_| SessionError::LockPoisoned)?;
        session.submit(color, mv)
    }

    /// Board of a game as `color` should see it
    pub fn view_for(&self, id: GameId, color: Color) -> Result<Grid, SessionError> {
        let session = self.get(id)?;
        let session = session.lock().map_err(|_| SessionError::LockPoisoned)?;
        Ok(session.view_for(color))
    }

    /// Drop a game. Returns false if it was not registered.
    pub fn remove(&self, id: GameId) -> Result<bool, SessionError> {
        let removed = self
            .games
            .write()
            .map_err(|_| SessionError::LockPoisoned)?
            .remove(&id)
            .is_some();
        if removed {
            tracing::info!(game = id, "game removed");
        }
        Ok(removed)
    }

    /// Ids of all registered games, ascending
    pub fn ids(&self) -> Result<Vec<GameId>, SessionError> {
        let mut ids: Vec<GameId> = self
            .games
            .read()
            .map_err(|_| SessionError::LockPoisoned)?
            .keys()
            .copied()
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    pub fn len(&self) -> Result<usize, SessionError> {
        Ok(self.games.read().map_err(|_| SessionError::LockPoisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, SessionError> {
        Ok(self.len()? == 0)
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}
