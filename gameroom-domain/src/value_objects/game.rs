// Game catalog value objects

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Game {
    TheRunner,
    DayOne,
    LavaRush,
    SuperMonaco,
}

impl Game {
    pub const ALL: [Game; 4] = [Game::TheRunner, Game::DayOne, Game::LavaRush, Game::SuperMonaco];

    pub fn id(&self) -> &'static str {
        match self {
            Game::TheRunner => "1",
            Game::DayOne => "2",
            Game::LavaRush => "3",
            Game::SuperMonaco => "4",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Game::TheRunner => "The Runner",
            Game::DayOne => "Day One",
            Game::LavaRush => "Lava Rush",
            Game::SuperMonaco => "Super Monaco",
        }
    }

    pub fn from_id(id: &str) -> Option<Game> {
        Game::ALL.into_iter().find(|game| game.id() == id)
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Game> {
        let name = name.trim();
        Game::ALL
            .into_iter()
            .find(|game| game.name().eq_ignore_ascii_case(name))
    }
}

/// Raw game identifier as exported (`"1"`..`"4"` for the known catalog).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl GameId {
    pub fn game(&self) -> Option<Game> {
        Game::from_id(&self.0)
    }

    /// Display label: the game name for known ids, the raw id otherwise.
    pub fn label(&self) -> String {
        match self.game() {
            Some(game) => game.name().to_string(),
            None => self.0.clone(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Game> for GameId {
    fn from(game: Game) -> Self {
        GameId(game.id().to_string())
    }
}

impl From<&str> for GameId {
    fn from(value: &str) -> Self {
        GameId(value.to_string())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
