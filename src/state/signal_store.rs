use std::sync::{Arc, Mutex};

use dashmap::DashMap;

use crate::clock::Clock;
use crate::config::DEFAULT_HISTORY_LIMIT;
use crate::error::{AppError, Result};
use crate::types::{Feedback, Signal, SignalDraft, SignalResult, SignalStats};

// ---------------------------------------------------------------------------
// SignalStore
// ---------------------------------------------------------------------------

/// Owns every signal for the lifetime of the process.
///
/// Creation holds `next_id` for the whole allocate-stamp-insert sequence, so
/// ids and `created_at` advance together. Result/feedback updates go through
/// the DashMap entry lock and cannot lose each other's writes.
pub struct SignalStore {
    /// signal_id → Signal
    signals: DashMap<u64, Signal>,
    next_id: Mutex<u64>,
    clock: Arc<dyn Clock>,
}

impl SignalStore {
    pub fn new(clock: Arc<dyn Clock>) -> Arc<Self> {
        Arc::new(Self {
            signals: DashMap::new(),
            next_id: Mutex::new(1),
            clock,
        })
    }

    pub fn create_signal(&self, draft: SignalDraft) -> Signal {
        let mut next_id = self.next_id.lock().unwrap_or_else(|e| e.into_inner());
        let id = *next_id;
        *next_id += 1;
        let signal = Signal::from_draft(id, draft, self.clock.now());
        self.signals.insert(id, signal.clone());
        signal
    }

    pub fn get(&self, id: u64) -> Result<Signal> {
        self.signals
            .get(&id)
            .map(|s| s.clone())
            .ok_or_else(signal_not_found)
    }

    /// Newest first, at most `limit` (default 10).
    pub fn signals_by_game(&self, game_id: u64, limit: Option<usize>) -> Vec<Signal> {
        self.newest_first(|s| s.game_id == game_id, limit)
    }

    /// Newest first across all games, at most `limit` (default 10).
    pub fn recent_signals(&self, limit: Option<usize>) -> Vec<Signal> {
        self.newest_first(|_| true, limit)
    }

    /// Last write wins.
    pub fn update_result(&self, id: u64, result: SignalResult) -> Result<Signal> {
        let mut entry = self.signals.get_mut(&id).ok_or_else(signal_not_found)?;
        entry.result = Some(result);
        Ok(entry.clone())
    }

    /// Last write wins.
    pub fn update_feedback(&self, id: u64, feedback: Feedback) -> Result<Signal> {
        let mut entry = self.signals.get_mut(&id).ok_or_else(signal_not_found)?;
        entry.user_feedback = Some(feedback);
        Ok(entry.clone())
    }

    /// Win/loss aggregate for one game, or for every signal when `game_id` is None.
    pub fn stats(&self, game_id: Option<u64>) -> SignalStats {
        let mut stats = SignalStats::default();
        for entry in self.signals.iter() {
            let s = entry.value();
            if game_id.is_some_and(|g| g != s.game_id) {
                continue;
            }
            stats.total_signals += 1;
            match s.result {
                Some(SignalResult::Win) => stats.wins += 1,
                Some(SignalResult::Loss) => stats.losses += 1,
                None => {}
            }
        }
        let completed = stats.wins + stats.losses;
        if completed > 0 {
            stats.win_rate = (stats.wins as f64 / completed as f64 * 100.0).round() as u32;
        }
        stats
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    fn newest_first(&self, keep: impl Fn(&Signal) -> bool, limit: Option<usize>) -> Vec<Signal> {
        let mut out: Vec<Signal> = self
            .signals
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        out.truncate(limit.unwrap_or(DEFAULT_HISTORY_LIMIT));
        out
    }
}

fn signal_not_found() -> AppError {
    AppError::NotFound("Signal not found".to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
