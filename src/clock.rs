//! Wall-clock access, injectable so generation and storage can be tested at a
//! fixed instant.

use chrono::{DateTime, FixedOffset, Offset, Timelike, Utc};

use crate::config::CIVIL_UTC_OFFSET_HOURS;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Host clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl FixedClock {
    /// Clock pinned to `hh:mm` civil time (UTC-3) on 2024-01-15.
    pub fn at_civil(hour: u32, minute: u32) -> Self {
        use chrono::TimeZone;
        let civil = civil_offset()
            .with_ymd_and_hms(2024, 1, 15, hour, minute, 0)
            .single()
            .expect("valid civil time");
        Self(civil.with_timezone(&Utc))
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The fixed civil offset used for every published time, independent of the
/// host timezone.
pub fn civil_offset() -> FixedOffset {
    FixedOffset::east_opt(CIVIL_UTC_OFFSET_HOURS * 3600).unwrap_or_else(|| Utc.fix())
}

pub fn civil_time(now: DateTime<Utc>) -> DateTime<FixedOffset> {
    now.with_timezone(&civil_offset())
}

/// Minutes elapsed since civil midnight, 0..1440.
pub fn civil_minutes_of_day(now: DateTime<Utc>) -> u32 {
    let civil = civil_time(now);
    civil.hour() * 60 + civil.minute()
}
