//! Request bodies as they arrive on the wire, and their validation into core
//! types. Every field is optional here so a bad body reports all of its
//! problems at once instead of failing on the first missing key.

use std::collections::HashSet;
use std::str::FromStr;

use serde::Deserialize;

use crate::config::{BETTING_HOUSE_COUNT, CONFIDENCE_RANGE};
use crate::error::{AppError, FieldError, Result};
use crate::generator::slots::parse_hhmm;
use crate::state::GameCatalog;
use crate::types::{
    Feedback, NewGame, Provider, Recommendation, SignalDraft, SignalResult, Strength,
};

/// Accumulates field errors while a body is checked.
#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    fn required<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.fail(field, "is required");
        }
        value
    }

    fn text(&mut self, field: &str, value: Option<String>) -> Option<String> {
        let value = self.required(field, value)?;
        if value.trim().is_empty() {
            self.fail(field, "must not be empty");
            return None;
        }
        Some(value)
    }

    fn parsed<T: FromStr<Err = String>>(&mut self, field: &str, value: Option<String>) -> Option<T> {
        let raw = self.required(field, value)?;
        self.parse_optional(field, Some(raw)).flatten()
    }

    fn parse_optional<T: FromStr<Err = String>>(
        &mut self,
        field: &str,
        value: Option<String>,
    ) -> Option<Option<T>> {
        match value {
            None => Some(None),
            Some(raw) => match raw.parse::<T>() {
                Ok(v) => Some(Some(v)),
                Err(e) => {
                    self.fail(field, e);
                    None
                }
            },
        }
    }

    fn in_range(&mut self, field: &str, value: Option<i64>, lo: i64, hi: i64) -> Option<i64> {
        let v = self.required(field, value)?;
        if v < lo || v > hi {
            self.fail(field, format!("must be between {lo} and {hi}"));
            return None;
        }
        Some(v)
    }

    /// Optional unsigned integer carried as text (query strings).
    fn unsigned<T: FromStr>(&mut self, field: &str, value: Option<String>) -> Option<Option<T>> {
        match value {
            None => Some(None),
            Some(raw) => match raw.trim().parse::<T>() {
                Ok(v) => Some(Some(v)),
                Err(_) => {
                    self.fail(field, "must be a non-negative integer");
                    None
                }
            },
        }
    }

    fn positive(&mut self, field: &str, value: Option<i64>) -> Option<u32> {
        self.in_range(field, value, 1, i64::from(u32::MAX)).map(|v| v as u32)
    }

    fn civil_time(&mut self, field: &str, value: Option<String>) -> Option<String> {
        let raw = self.required(field, value)?;
        if parse_hhmm(&raw).is_none() {
            self.fail(field, "must be a 24-hour HH:MM time");
            return None;
        }
        Some(raw)
    }

    fn finish<T>(self, message: &str, value: Option<T>) -> Result<T> {
        match value {
            Some(v) if self.errors.is_empty() => Ok(v),
            _ => Err(AppError::InvalidInput {
                message: message.to_string(),
                errors: self.errors,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSignalRequest {
    pub game_id: Option<i64>,
    pub strength: Option<String>,
    pub strength_level: Option<i64>,
    pub recommendation: Option<String>,
    pub confidence: Option<i64>,
    pub assertiveness: Option<i64>,
    pub normal_spins: Option<i64>,
    pub turbo_spins: Option<i64>,
    pub auto_mode: Option<bool>,
    pub profitable_time_start: Option<String>,
    pub profitable_time_end: Option<String>,
    pub betting_houses: Option<Vec<String>>,
    pub algorithm: Option<String>,
    pub result: Option<String>,
    pub user_feedback: Option<String>,
}

impl CreateSignalRequest {
    /// Checks every field, then that `gameId` names a catalogued game. Field
    /// errors win over an unknown game so the caller sees the full list.
    pub fn validate(self, catalog: &GameCatalog) -> Result<SignalDraft> {
        let mut c = Checker::default();

        let game_id = c.in_range("gameId", self.game_id, 1, i64::MAX).map(|v| v as u64);

        let strength: Option<Strength> = c.parsed("strength", self.strength);
        let strength_level = c.in_range("strengthLevel", self.strength_level, 1, 4).map(|v| v as u8);
        if let (Some(s), Some(level)) = (strength, strength_level) {
            if s.level() != level {
                c.fail(
                    "strengthLevel",
                    format!("must be {} for strength {s}", s.level()),
                );
            }
        }
        let recommendation: Option<Recommendation> =
            c.parsed("recommendation", self.recommendation);
        let confidence = c
            .in_range(
                "confidence",
                self.confidence,
                i64::from(CONFIDENCE_RANGE.0),
                i64::from(CONFIDENCE_RANGE.1),
            )
            .map(|v| v as u8);
        let assertiveness = c
            .in_range("assertiveness", self.assertiveness, 0, 100)
            .map(|v| v as u8);
        let normal_spins = c.positive("normalSpins", self.normal_spins);
        let turbo_spins = c.positive("turboSpins", self.turbo_spins);
        let start = c.civil_time("profitableTimeStart", self.profitable_time_start);
        let end = c.civil_time("profitableTimeEnd", self.profitable_time_end);
        let betting_houses = check_houses(&mut c, self.betting_houses);
        let algorithm = c.text("algorithm", self.algorithm);
        let result: Option<Option<SignalResult>> = c.parse_optional("result", self.result);
        let user_feedback: Option<Option<Feedback>> =
            c.parse_optional("userFeedback", self.user_feedback);

        let draft = (|| {
            Some(SignalDraft {
                game_id: game_id?,
                strength: strength?,
                strength_level: strength_level?,
                recommendation: recommendation?,
                confidence: confidence?,
                assertiveness: assertiveness?,
                normal_spins: normal_spins?,
                turbo_spins: turbo_spins?,
                auto_mode: self.auto_mode.unwrap_or(false),
                profitable_time_start: start?,
                profitable_time_end: end?,
                betting_houses: betting_houses?,
                algorithm: algorithm?,
                result: result?,
                user_feedback: user_feedback?,
            })
        })();
        let draft = c.finish("Invalid signal data", draft)?;
        if !catalog.contains(draft.game_id) {
            return Err(AppError::NotFound("Game not found".to_string()));
        }
        Ok(draft)
    }
}

fn check_houses(c: &mut Checker, houses: Option<Vec<String>>) -> Option<Vec<String>> {
    let houses = c.required("bettingHouses", houses)?;
    let (lo, hi) = BETTING_HOUSE_COUNT;
    if houses.len() < lo as usize || houses.len() > hi as usize {
        c.fail("bettingHouses", format!("must list {lo} to {hi} betting houses"));
        return None;
    }
    if houses.iter().any(|h| h.trim().is_empty()) {
        c.fail("bettingHouses", "must not contain empty names");
        return None;
    }
    let mut seen = HashSet::new();
    if let Some(dup) = houses.iter().find(|h| !seen.insert(h.as_str())) {
        c.fail("bettingHouses", format!("lists {dup} more than once"));
        return None;
    }
    Some(houses)
}

#[derive(Debug, Default, Deserialize)]
pub struct ResultRequest {
    pub result: Option<String>,
}

impl ResultRequest {
    pub fn validate(self) -> Result<SignalResult> {
        self.result
            .as_deref()
            .and_then(|r| r.parse().ok())
            .ok_or_else(|| AppError::InvalidInput {
                message: "Invalid result. Must be 'WIN' or 'LOSS'".to_string(),
                errors: vec![FieldError::new("result", "must be WIN or LOSS")],
            })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedbackRequest {
    pub feedback: Option<String>,
}

impl FeedbackRequest {
    pub fn validate(self) -> Result<Feedback> {
        self.feedback
            .as_deref()
            .and_then(|f| f.parse().ok())
            .ok_or_else(|| AppError::InvalidInput {
                message: "Invalid feedback. Must be 'WORKED' or 'DID_NOT_WORK'".to_string(),
                errors: vec![FieldError::new("feedback", "must be WORKED or DID_NOT_WORK")],
            })
    }
}

// ---------------------------------------------------------------------------
// Query strings
// ---------------------------------------------------------------------------

/// `?limit=` on the history routes. Kept as text so a bad value is reported
/// against its field.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<String>,
}

impl HistoryQuery {
    /// Requested limit capped at `max`; `None` leaves the store default.
    pub fn validate(self, max: usize) -> Result<Option<usize>> {
        let mut c = Checker::default();
        let limit: Option<Option<usize>> = c.unsigned("limit", self.limit);
        c.finish("Invalid query parameters", limit)
            .map(|l| l.map(|l| l.min(max)))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    #[serde(rename = "gameId")]
    pub game_id: Option<String>,
}

impl StatsQuery {
    pub fn validate(self) -> Result<Option<u64>> {
        let mut c = Checker::default();
        let game_id: Option<Option<u64>> = c.unsigned("gameId", self.game_id);
        c.finish("Invalid query parameters", game_id)
    }
}

// ---------------------------------------------------------------------------
// Games
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub emoji: Option<String>,
    pub description: Option<String>,
    pub provider: Option<String>,
    pub badge_text: Option<String>,
    pub badge_color: Option<String>,
    pub assertiveness_level: Option<i64>,
    pub is_active: Option<bool>,
}

impl CreateGameRequest {
    pub fn validate(self) -> Result<NewGame> {
        let mut c = Checker::default();
        let name = c.text("name", self.name);
        let display_name = c.text("displayName", self.display_name);
        let provider = c.text("provider", self.provider).map(Provider::from);
        let level = c
            .in_range("assertivenessLevel", self.assertiveness_level, 0, 100)
            .map(|v| v as u8);

        let new_game = (|| {
            let level = level?;
            Some(NewGame {
                name: name?,
                display_name: display_name?,
                emoji: self.emoji.unwrap_or_default(),
                description: self.description.unwrap_or_default(),
                provider: provider?,
                badge_text: self
                    .badge_text
                    .unwrap_or_else(|| format!("{level}% Assertivo")),
                badge_color: self.badge_color.unwrap_or_else(|| "gray".to_string()),
                assertiveness_level: level,
                is_active: self.is_active.unwrap_or(true),
            })
        })();
        c.finish("Invalid game data", new_game)
    }
}
