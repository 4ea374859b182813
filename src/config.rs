use crate::error::{AppError, Result};

/// History queries return this many signals when the caller gives no `limit`.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Civil clock used for profitable windows: Brasília time, no DST.
pub const CIVIL_UTC_OFFSET_HOURS: i32 = -3;

/// Confidence above this value turns the recommendation into PLAY.
pub const PLAY_CONFIDENCE_THRESHOLD: u8 = 85;

/// Inclusive confidence range drawn for every signal.
pub const CONFIDENCE_RANGE: (u32, u32) = (80, 99);

/// Inclusive range for how many betting houses a signal lists.
pub const BETTING_HOUSE_COUNT: (u32, u32) = (3, 4);

/// Request latency histogram bounds, in microseconds (1us to 60s).
pub mod latency_bounds {
    pub const LOW_US: u64 = 1;
    pub const HIGH_US: u64 = 60_000_000;
    pub const SIGFIG: u8 = 3;
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_host: String,
    pub port: u16,
    pub log_level: String,
    /// Seed for the generator's PRNG (RNG_SEED). Unset = seeded from entropy.
    pub rng_seed: Option<u64>,
    /// Upper bound applied to caller-supplied `limit` values (HISTORY_LIMIT_MAX)
    pub history_limit_max: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_host: std::env::var("BIND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("PORT must be a valid port number".to_string()))?,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            rng_seed: match std::env::var("RNG_SEED") {
                Ok(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                    AppError::Config("RNG_SEED must be an unsigned integer".to_string())
                })?),
                Err(_) => None,
            },
            history_limit_max: std::env::var("HISTORY_LIMIT_MAX")
                .unwrap_or_else(|_| "100".to_string())
                .parse::<usize>()
                .unwrap_or(100)
                .max(DEFAULT_HISTORY_LIMIT),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}
