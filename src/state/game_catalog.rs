use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::error::{AppError, Result};
use crate::types::{Game, NewGame, Provider};

// ---------------------------------------------------------------------------
// GameCatalog
// ---------------------------------------------------------------------------

/// Registry of playable games. Seeded once at startup; ids come from a counter
/// of their own, separate from signal ids.
pub struct GameCatalog {
    /// game_id → Game
    games: DashMap<u64, Game>,
    next_id: AtomicU64,
}

impl GameCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Catalog holding the reference deployment's games.
    pub fn seeded() -> Arc<Self> {
        let catalog = Self::new();
        for game in seed_games() {
            catalog.create_game(game);
        }
        catalog
    }

    pub fn create_game(&self, new_game: NewGame) -> Game {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let game = new_game.into_game(id);
        self.games.insert(id, game.clone());
        game
    }

    /// Active games ordered by id.
    pub fn list(&self) -> Vec<Game> {
        let mut games: Vec<Game> = self
            .games
            .iter()
            .filter(|entry| entry.value().is_active)
            .map(|entry| entry.value().clone())
            .collect();
        games.sort_by_key(|g| g.id);
        games
    }

    /// Looks up any game, active or not.
    pub fn get_by_id(&self, id: u64) -> Result<Game> {
        self.games
            .get(&id)
            .map(|g| g.clone())
            .ok_or_else(|| AppError::NotFound("Game not found".to_string()))
    }

    pub fn contains(&self, id: u64) -> bool {
        self.games.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }
}

impl Default for GameCatalog {
    fn default() -> Self {
        Self {
            games: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }
}

// ---------------------------------------------------------------------------
// Seed table
// ---------------------------------------------------------------------------

/// `(name, display_name, emoji, description, provider, badge_color, assertiveness)`
const SEED: [(&str, &str, &str, &str, &str, &str, u8); 8] = [
    ("fortune-rabbit", "Fortune Rabbit", "🐰", "Coelho da Fortuna", "PG Soft", "fortune-green", 96),
    ("fortune-tiger", "Fortune Tiger", "🐯", "Tigre da Fortuna", "PG Soft", "amber", 94),
    ("fortune-mouse", "Fortune Mouse", "🐭", "Rato da Fortuna", "PG Soft", "blue", 92),
    ("fortune-ox", "Fortune OX", "🐂", "Touro da Fortuna", "PG Soft", "red", 95),
    ("fortune-dragon", "Fortune Dragon", "🐉", "Dragão da Fortuna", "PG Soft", "purple", 98),
    ("lucky-monkey", "Macaco Sortudo", "🐵", "Lucky Monkey Fat Panda", "Fat Panda", "green", 90),
    ("lucky-mouse", "Ratinho Sortudo", "🐁", "Lucky Mouse Pragmatic", "Pragmatic Play", "pink", 93),
    ("lucky-tiger", "Tigre Sortudo", "🐅", "Lucky Tiger Pragmatic", "Pragmatic Play", "orange", 91),
];

fn seed_games() -> Vec<NewGame> {
    SEED.iter()
        .map(|&(name, display_name, emoji, description, provider, badge_color, level)| NewGame {
            name: name.to_string(),
            display_name: display_name.to_string(),
            emoji: emoji.to_string(),
            description: description.to_string(),
            provider: Provider::from(provider),
            badge_text: format!("{level}% Assertivo"),
            badge_color: badge_color.to_string(),
            assertiveness_level: level,
            is_active: true,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
