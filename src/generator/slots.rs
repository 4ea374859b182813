//! Profitable time windows, all in civil minutes-of-day.

const MINUTES_PER_DAY: u32 = 24 * 60;

/// `(offset, duration)` in minutes from "now", nearest first.
pub const SLOT_PLAN: [(u32, u32); 4] = [(15, 45), (90, 60), (180, 45), (360, 90)];

/// Fixed daily paying windows `(start, end)`, both ends inclusive.
pub const PAYING_HOURS: [(u32, u32); 5] = [
    (6 * 60, 8 * 60 + 30),
    (10 * 60 + 15, 12 * 60 + 45),
    (14 * 60 + 30, 16 * 60),
    (18 * 60 + 45, 20 * 60 + 30),
    (21 * 60 + 15, 23 * 60 + 45),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: u32,
    pub end: u32,
}

impl TimeSlot {
    pub fn start_label(&self) -> String {
        format_hhmm(self.start)
    }

    pub fn end_label(&self) -> String {
        format_hhmm(self.end)
    }
}

/// Zero-padded `HH:MM`, wrapping past midnight.
pub fn format_hhmm(minutes: u32) -> String {
    let m = minutes % MINUTES_PER_DAY;
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// Parses a strict `HH:MM` (24h) into minutes-of-day.
pub fn parse_hhmm(s: &str) -> Option<u32> {
    let (h, m) = s.split_once(':')?;
    if h.len() != 2 || m.len() != 2 {
        return None;
    }
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    (h < 24 && m < 60).then_some(h * 60 + m)
}

pub fn profitable_slots(now_minutes: u32) -> [TimeSlot; 4] {
    SLOT_PLAN.map(|(offset, duration)| {
        let start = now_minutes + offset;
        TimeSlot {
            start: start % MINUTES_PER_DAY,
            end: (start + duration) % MINUTES_PER_DAY,
        }
    })
}

/// The slot published on a signal.
pub fn next_profitable_slot(now_minutes: u32) -> TimeSlot {
    profitable_slots(now_minutes)[0]
}

pub fn in_profitable_hours(minutes: u32) -> bool {
    let m = minutes % MINUTES_PER_DAY;
    PAYING_HOURS
        .iter()
        .any(|&(start, end)| m >= start && m <= end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_am_publishes_quarter_past_to_eleven() {
        let slot = next_profitable_slot(10 * 60);
        assert_eq!(slot.start_label(), "10:15");
        assert_eq!(slot.end_label(), "11:00");
    }

    #[test]
    fn full_schedule_from_ten_am() {
        let labels: Vec<(String, String)> = profitable_slots(10 * 60)
            .iter()
            .map(|s| (s.start_label(), s.end_label()))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("10:15".to_string(), "11:00".to_string()),
                ("11:30".to_string(), "12:30".to_string()),
                ("13:00".to_string(), "13:45".to_string()),
                ("16:00".to_string(), "17:30".to_string()),
            ]
        );
    }

    #[test]
    fn slots_wrap_past_midnight() {
        let slot = next_profitable_slot(23 * 60 + 50);
        assert_eq!(slot.start_label(), "00:05");
        assert_eq!(slot.end_label(), "00:50");

        let late = profitable_slots(20 * 60)[3];
        assert_eq!(late.start_label(), "02:00");
        assert_eq!(late.end_label(), "03:30");
    }

    #[test]
    fn end_wraps_even_when_start_does_not() {
        let slot = next_profitable_slot(23 * 60 + 30);
        assert_eq!(slot.start_label(), "23:45");
        assert_eq!(slot.end_label(), "00:30");
    }

    #[test]
    fn parse_hhmm_accepts_only_strict_format() {
        assert_eq!(parse_hhmm("00:00"), Some(0));
        assert_eq!(parse_hhmm("23:59"), Some(1439));
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("9:30"), None);
        assert_eq!(parse_hhmm("09:60"), None);
        assert_eq!(parse_hhmm("0930"), None);
    }

    #[test]
    fn paying_hours_are_inclusive() {
        assert!(in_profitable_hours(6 * 60));
        assert!(in_profitable_hours(8 * 60 + 30));
        assert!(!in_profitable_hours(8 * 60 + 31));
        assert!(!in_profitable_hours(3 * 60));
        assert!(in_profitable_hours(23 * 60 + 45));
    }
}
