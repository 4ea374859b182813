use std::time::{Duration, Instant};

use serde::Deserialize;
use serde_json::json;

/// How long a freshly generated signal is shown as live.
pub const SIGNAL_VALIDITY: Duration = Duration::from_secs(150);

// ---------------------------------------------------------------------------
// API response types (mirror the server's JSON shapes)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct GameResponse {
    pub id: u64,
    pub name: String,
    pub display_name: String,
    pub emoji: String,
    pub provider: String,
    pub badge_text: String,
    pub assertiveness_level: u8,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct SignalResponse {
    pub id: u64,
    pub game_id: u64,
    pub strength: String,
    pub strength_level: u8,
    pub recommendation: String,
    pub confidence: u8,
    pub assertiveness: u8,
    pub normal_spins: u32,
    pub turbo_spins: u32,
    pub auto_mode: bool,
    pub profitable_time_start: String,
    pub profitable_time_end: String,
    pub betting_houses: Vec<String>,
    pub algorithm: String,
    pub result: Option<String>,
    pub user_feedback: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_signals: u64,
    pub win_rate: u32,
    pub wins: u64,
    pub losses: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotResponse {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockResponse {
    pub time: String,
    pub date: String,
    pub in_profitable_hours: bool,
    pub upcoming_slots: Vec<SlotResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[allow(dead_code)]
pub struct LatencyResponse {
    pub p50_ms: Option<f64>,
    pub p99_ms: Option<f64>,
    pub sample_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct FeedbackEnvelope {
    signal: SignalResponse,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: String,
}

// ---------------------------------------------------------------------------
// App state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionStatus {
    Connected,
    Error(String),
    Connecting,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub status: ConnectionStatus,
    pub games: Vec<GameResponse>,
    pub selected: usize,
    /// Newest first, across all games.
    pub recent: Vec<SignalResponse>,
    pub stats: StatsResponse,
    pub clock: ClockResponse,
    pub latency: LatencyResponse,
    /// Signal the result/feedback keys act on.
    pub current: Option<SignalResponse>,
    pub generated_at: Option<Instant>,
    /// Last action outcome, shown in the footer.
    pub notice: Option<String>,
    pub base_url: String,
}

impl AppState {
    pub fn new(base_url: String) -> Self {
        Self {
            status: ConnectionStatus::Connecting,
            games: Vec::new(),
            selected: 0,
            recent: Vec::new(),
            stats: StatsResponse::default(),
            clock: ClockResponse::default(),
            latency: LatencyResponse::default(),
            current: None,
            generated_at: None,
            notice: None,
            base_url,
        }
    }

    pub fn selected_game(&self) -> Option<&GameResponse> {
        self.games.get(self.selected)
    }

    pub fn game_label(&self, game_id: u64) -> String {
        self.games
            .iter()
            .find(|g| g.id == game_id)
            .map_or_else(|| format!("#{game_id}"), |g| g.display_name.clone())
    }

    pub fn select_next(&mut self) {
        if !self.games.is_empty() {
            self.selected = (self.selected + 1).min(self.games.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Seconds left before the current signal goes stale.
    pub fn seconds_remaining(&self) -> Option<u64> {
        let started = self.generated_at?;
        Some(SIGNAL_VALIDITY.saturating_sub(started.elapsed()).as_secs())
    }

    pub async fn refresh(&mut self, client: &reqwest::Client) {
        let games_url = format!("{}/api/games", self.base_url);
        let recent_url = format!("{}/api/signals/recent?limit=20", self.base_url);
        let stats_url = match self.selected_game() {
            Some(g) => format!("{}/api/signals/stats?gameId={}", self.base_url, g.id),
            None => format!("{}/api/signals/stats", self.base_url),
        };
        let clock_url = format!("{}/api/clock", self.base_url);
        let latency_url = format!("{}/api/stats/latency", self.base_url);

        let (games_res, recent_res, stats_res, clock_res, latency_res) = tokio::join!(
            fetch_json::<Vec<GameResponse>>(client, &games_url),
            fetch_json::<Vec<SignalResponse>>(client, &recent_url),
            fetch_json::<StatsResponse>(client, &stats_url),
            fetch_json::<ClockResponse>(client, &clock_url),
            fetch_json::<LatencyResponse>(client, &latency_url),
        );

        match (games_res, recent_res, stats_res) {
            (Ok(games), Ok(recent), Ok(stats)) => {
                self.games = games;
                self.selected = self.selected.min(self.games.len().saturating_sub(1));
                self.recent = recent;
                self.stats = stats;
                self.status = ConnectionStatus::Connected;
                if let Some(current) = &self.current {
                    if let Some(fresh) = self.recent.iter().find(|s| s.id == current.id) {
                        self.current = Some(fresh.clone());
                    }
                }
                if let Ok(clock) = clock_res {
                    self.clock = clock;
                }
                if let Ok(latency) = latency_res {
                    self.latency = latency;
                }
            }
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                self.status = ConnectionStatus::Error(e);
            }
        }
    }

    pub async fn generate(&mut self, client: &reqwest::Client) {
        let Some(game) = self.selected_game() else {
            self.notice = Some("no game selected".to_string());
            return;
        };
        let url = format!("{}/api/signals/generate/{}", self.base_url, game.id);
        let label = game.display_name.clone();
        match send_json::<SignalResponse>(client.post(&url)).await {
            Ok(signal) => {
                self.notice = Some(format!("signal #{} generated for {label}", signal.id));
                self.current = Some(signal);
                self.generated_at = Some(Instant::now());
            }
            Err(e) => self.notice = Some(format!("generate failed: {e}")),
        }
    }

    pub async fn set_result(&mut self, client: &reqwest::Client, result: &str) {
        let Some(id) = self.current.as_ref().map(|s| s.id) else {
            self.notice = Some("generate a signal first".to_string());
            return;
        };
        let url = format!("{}/api/signals/{id}", self.base_url);
        let request = client.patch(&url).json(&json!({ "result": result }));
        match send_json::<SignalResponse>(request).await {
            Ok(signal) => {
                self.notice = Some(format!("signal #{id} marked {result}"));
                self.current = Some(signal);
            }
            Err(e) => self.notice = Some(format!("result failed: {e}")),
        }
    }

    pub async fn send_feedback(&mut self, client: &reqwest::Client, feedback: &str) {
        let Some(id) = self.current.as_ref().map(|s| s.id) else {
            self.notice = Some("generate a signal first".to_string());
            return;
        };
        let url = format!("{}/api/signals/{id}/feedback", self.base_url);
        let request = client.post(&url).json(&json!({ "feedback": feedback }));
        match send_json::<FeedbackEnvelope>(request).await {
            Ok(envelope) => {
                self.notice = Some(format!("feedback {feedback} sent for #{id}"));
                self.current = Some(envelope.signal);
            }
            Err(e) => self.notice = Some(format!("feedback failed: {e}")),
        }
    }
}

async fn fetch_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, String> {
    send_json(client.get(url)).await
}

/// Sends the request and decodes a success body, or the server's `message`.
async fn send_json<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, String> {
    let resp = request.send().await.map_err(|e| e.to_string())?;
    let status = resp.status();
    if status.is_success() {
        return resp.json::<T>().await.map_err(|e| format!("parse error: {e}"));
    }
    match resp.json::<ErrorEnvelope>().await {
        Ok(body) => Err(format!("{status}: {}", body.message)),
        Err(_) => Err(status.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// `▰▰▱▱` style bar for a 1–4 strength level.
pub fn strength_bar(level: u8) -> String {
    let filled = usize::from(level.min(4));
    format!("{}{}", "▰".repeat(filled), "▱".repeat(4 - filled))
}

pub fn format_countdown(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// `HH:MM:SS` out of an RFC 3339 timestamp, or the raw text if it doesn't parse.
pub fn format_created_at(ts: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(ts)
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|_| ts.to_string())
}

pub fn format_outcome(result: Option<&str>) -> &'static str {
    match result {
        Some("WIN") => "WIN",
        Some("LOSS") => "LOSS",
        _ => "—",
    }
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}
