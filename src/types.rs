use chrono::{DateTime, Utc};
use serde::Serialize;
use std::str::FromStr;

use crate::config::PLAY_CONFIDENCE_THRESHOLD;

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// Game vendor. Known vendors get their own generation profile; anything else
/// is carried verbatim and falls back to the generic profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Provider {
    PgSoft,
    FatPanda,
    PragmaticPlay,
    Other(String),
}

impl Provider {
    pub fn as_str(&self) -> &str {
        match self {
            Provider::PgSoft => "PG Soft",
            Provider::FatPanda => "Fat Panda",
            Provider::PragmaticPlay => "Pragmatic Play",
            Provider::Other(name) => name,
        }
    }
}

impl From<String> for Provider {
    fn from(s: String) -> Self {
        match s.as_str() {
            "PG Soft" => Provider::PgSoft,
            "Fat Panda" => Provider::FatPanda,
            "Pragmatic Play" => Provider::PragmaticPlay,
            _ => Provider::Other(s),
        }
    }
}

impl From<&str> for Provider {
    fn from(s: &str) -> Self {
        Provider::from(s.to_string())
    }
}

impl From<Provider> for String {
    fn from(p: Provider) -> Self {
        p.as_str().to_string()
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: u64,
    pub name: String,
    pub display_name: String,
    pub emoji: String,
    pub description: String,
    pub provider: Provider,
    pub badge_text: String,
    pub badge_color: String,
    /// Display-only, 0–100.
    pub assertiveness_level: u8,
    pub is_active: bool,
}

/// A game before the catalog assigns its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGame {
    pub name: String,
    pub display_name: String,
    pub emoji: String,
    pub description: String,
    pub provider: Provider,
    pub badge_text: String,
    pub badge_color: String,
    pub assertiveness_level: u8,
    pub is_active: bool,
}

impl NewGame {
    pub fn into_game(self, id: u64) -> Game {
        Game {
            id,
            name: self.name,
            display_name: self.display_name,
            emoji: self.emoji,
            description: self.description,
            provider: self.provider,
            badge_text: self.badge_text,
            badge_color: self.badge_color,
            assertiveness_level: self.assertiveness_level,
            is_active: self.is_active,
        }
    }
}

// ---------------------------------------------------------------------------
// Signal enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strength {
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl Strength {
    /// Canonical ordinal, 1 (weak) to 4 (very strong).
    pub fn level(self) -> u8 {
        match self {
            Strength::Weak => 1,
            Strength::Medium => 2,
            Strength::Strong => 3,
            Strength::VeryStrong => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strength::Weak => "WEAK",
            Strength::Medium => "MEDIUM",
            Strength::Strong => "STRONG",
            Strength::VeryStrong => "VERY_STRONG",
        }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Strength {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "WEAK" | "FRACO" => Ok(Strength::Weak),
            "MEDIUM" | "MÉDIO" | "MEDIO" => Ok(Strength::Medium),
            "STRONG" | "FORTE" => Ok(Strength::Strong),
            "VERY_STRONG" | "VERY STRONG" | "MUITO FORTE" => Ok(Strength::VeryStrong),
            _ => Err(format!("Unknown strength: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Play,
    Wait,
}

impl Recommendation {
    pub fn from_confidence(confidence: u8) -> Self {
        if confidence > PLAY_CONFIDENCE_THRESHOLD {
            Recommendation::Play
        } else {
            Recommendation::Wait
        }
    }
}

impl FromStr for Recommendation {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PLAY" | "JOGAR" => Ok(Recommendation::Play),
            "WAIT" | "AGUARDAR" => Ok(Recommendation::Wait),
            _ => Err(format!("Unknown recommendation: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalResult {
    Win,
    Loss,
}

impl std::fmt::Display for SignalResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalResult::Win => write!(f, "WIN"),
            SignalResult::Loss => write!(f, "LOSS"),
        }
    }
}

impl FromStr for SignalResult {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "WIN" => Ok(SignalResult::Win),
            "LOSS" => Ok(SignalResult::Loss),
            _ => Err(format!("Unknown result: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Feedback {
    Worked,
    DidNotWork,
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Feedback::Worked => write!(f, "WORKED"),
            Feedback::DidNotWork => write!(f, "DID_NOT_WORK"),
        }
    }
}

impl FromStr for Feedback {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "WORKED" | "FUNCIONOU" => Ok(Feedback::Worked),
            "DID_NOT_WORK" | "NAO_FUNCIONOU" => Ok(Feedback::DidNotWork),
            _ => Err(format!("Unknown feedback: {s}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Signal
// ---------------------------------------------------------------------------

/// Fully computed signal that has not been stored yet (no id, no timestamp).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalDraft {
    pub game_id: u64,
    pub strength: Strength,
    pub strength_level: u8,
    pub recommendation: Recommendation,
    pub confidence: u8,
    pub assertiveness: u8,
    pub normal_spins: u32,
    pub turbo_spins: u32,
    pub auto_mode: bool,
    /// `HH:MM`, civil UTC-3.
    pub profitable_time_start: String,
    pub profitable_time_end: String,
    pub betting_houses: Vec<String>,
    pub algorithm: String,
    pub result: Option<SignalResult>,
    pub user_feedback: Option<Feedback>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub id: u64,
    pub game_id: u64,
    pub strength: Strength,
    pub strength_level: u8,
    pub recommendation: Recommendation,
    pub confidence: u8,
    pub assertiveness: u8,
    pub normal_spins: u32,
    pub turbo_spins: u32,
    pub auto_mode: bool,
    pub profitable_time_start: String,
    pub profitable_time_end: String,
    pub betting_houses: Vec<String>,
    pub algorithm: String,
    pub result: Option<SignalResult>,
    pub user_feedback: Option<Feedback>,
    pub created_at: DateTime<Utc>,
}

impl Signal {
    pub fn from_draft(id: u64, draft: SignalDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            game_id: draft.game_id,
            strength: draft.strength,
            strength_level: draft.strength_level,
            recommendation: draft.recommendation,
            confidence: draft.confidence,
            assertiveness: draft.assertiveness,
            normal_spins: draft.normal_spins,
            turbo_spins: draft.turbo_spins,
            auto_mode: draft.auto_mode,
            profitable_time_start: draft.profitable_time_start,
            profitable_time_end: draft.profitable_time_end,
            betting_houses: draft.betting_houses,
            algorithm: draft.algorithm,
            result: draft.result,
            user_feedback: draft.user_feedback,
            created_at,
        }
    }
}

/// Win-rate aggregate over a set of signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalStats {
    pub total_signals: usize,
    /// Rounded percentage of WIN among completed signals; 0 when none completed.
    pub win_rate: u32,
    pub wins: usize,
    pub losses: usize,
}
