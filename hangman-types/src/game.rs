use crate::WordId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

pub type GameId = i32;
pub type AttemptId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum GameStatus {
    InProgress, // Accepting guesses
    Won,        // Every letter of the word revealed
    Lost,       // Failure budget exhausted
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }

    /// Column representation, identical to the JSON one
    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::InProgress => "IN_PROGRESS",
            GameStatus::Won => "WON",
            GameStatus::Lost => "LOST",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGameStatus(pub String);

impl fmt::Display for UnknownGameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown game status '{}'", self.0)
    }
}

impl std::error::Error for UnknownGameStatus {}

impl FromStr for GameStatus {
    type Err = UnknownGameStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN_PROGRESS" => Ok(GameStatus::InProgress),
            "WON" => Ok(GameStatus::Won),
            "LOST" => Ok(GameStatus::Lost),
            other => Err(UnknownGameStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Game {
    pub id: GameId,
    pub word_id: WordId,
    pub max_attempts: i32,
    pub status: GameStatus,
    pub started_at: String,       // ISO 8601 string
    pub ended_at: Option<String>, // Set on WON/LOST
}

/// A game that has been validated but not yet persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub word_id: WordId,
    pub max_attempts: i32,
    pub status: GameStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Attempt {
    pub id: AttemptId,
    pub game_id: GameId,
    pub letter: char,
    pub was_hit: bool,
    pub recorded_at: String, // ISO 8601 string
}

/// Result of submitting one letter against a game.
///
/// A rejected guess (`accepted == false`) reports the unchanged state of the
/// game and must not be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessOutcome {
    pub accepted: bool,
    pub letter: Option<char>,
    pub was_hit: bool,
    pub revealed_pattern: String,
    pub failure_count: i32,
    pub new_status: GameStatus,
}

/// Read-only projection of an in-progress game.
/// Never carries the target word, only the revealed pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameView {
    pub game_id: GameId,
    pub revealed_pattern: String,
    pub guessed_letters: Vec<char>,
    pub remaining_letters: Vec<char>,
    pub failure_count: i32,
    pub max_attempts: i32,
    pub status: GameStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameResult {
    pub game_id: GameId,
    pub status: GameStatus,
    pub word: String,
    pub failure_count: i32,
    pub max_attempts: i32,
    pub started_at: String,
    pub ended_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_column_text() {
        for status in [GameStatus::InProgress, GameStatus::Won, GameStatus::Lost] {
            assert_eq!(status.as_str().parse::<GameStatus>().unwrap(), status);
        }
        assert!("EN_JUEGO".parse::<GameStatus>().is_err());
    }

    #[test]
    fn test_status_json_matches_column_text() {
        let json = serde_json::to_string(&GameStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
    }

    #[test]
    fn test_terminal_states() {
        assert!(!GameStatus::InProgress.is_terminal());
        assert!(GameStatus::Won.is_terminal());
        assert!(GameStatus::Lost.is_terminal());
    }
}
