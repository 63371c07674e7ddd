use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_METERS_PER_WALK: u32 = 10;
pub const MAX_METERS_PER_WALK: u32 = 100;

/// Distance attributed to a single walk, bounded to the slider range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetersPerWalk(u32);

impl MetersPerWalk {
    pub fn new(value: u32) -> Option<Self> {
        (value <= MAX_METERS_PER_WALK).then_some(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for MetersPerWalk {
    fn default() -> Self {
        Self(DEFAULT_METERS_PER_WALK)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Presses {
    pub press_r: bool,
    pub press_o: bool,
    pub press_reset: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEntry {
    pub date: NaiveDate,
    pub meters: u64,
}

/// Meters walked per calendar day, kept in the order dates were first seen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DailyLog {
    entries: Vec<LogEntry>,
}

impl DailyLog {
    pub fn get(&self, date: NaiveDate) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.date == date)
            .map(|entry| entry.meters)
    }

    pub fn add(&mut self, date: NaiveDate, delta: u64) -> u64 {
        let entry = self.entry_mut(date);
        entry.meters = entry.meters.saturating_add(delta);
        entry.meters
    }

    pub fn set(&mut self, date: NaiveDate, meters: u64) {
        self.entry_mut(date).meters = meters;
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, date: NaiveDate) -> &mut LogEntry {
        let index = match self.entries.iter().position(|entry| entry.date == date) {
            Some(index) => index,
            None => {
                self.entries.push(LogEntry { date, meters: 0 });
                self.entries.len() - 1
            }
        };
        &mut self.entries[index]
    }
}

#[derive(Debug, Deserialize)]
pub struct CycleRequest {
    #[serde(default)]
    pub actions: Vec<String>,
    pub meters_per_walk: Option<i64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct WalkForm {
    pub meters_per_walk: Option<i64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct StateQuery {
    pub meters_per_walk: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrackerResponse {
    pub date: String,
    pub count: u64,
    pub meters_per_walk: u32,
    pub total_meters: u64,
    pub today_meters: u64,
    pub clicks: u64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeriesPoint {
    pub date: String,
    pub meters: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeriesResponse {
    pub points: Vec<SeriesPoint>,
    pub total_meters: u64,
    pub days_recorded: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn add_keeps_one_entry_per_date_in_first_seen_order() {
        let mut log = DailyLog::default();
        log.add(day(3), 10);
        log.add(day(1), 5);
        log.add(day(3), 7);

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0], LogEntry { date: day(3), meters: 17 });
        assert_eq!(log.entries()[1], LogEntry { date: day(1), meters: 5 });
    }

    #[test]
    fn set_overwrites_without_touching_other_days() {
        let mut log = DailyLog::default();
        log.add(day(1), 40);
        log.add(day(2), 30);
        log.set(day(2), 0);

        assert_eq!(log.get(day(1)), Some(40));
        assert_eq!(log.get(day(2)), Some(0));
    }

    #[test]
    fn meters_per_walk_rejects_values_above_slider_range() {
        assert_eq!(MetersPerWalk::new(100).map(MetersPerWalk::get), Some(100));
        assert!(MetersPerWalk::new(101).is_none());
        assert_eq!(MetersPerWalk::default().get(), 10);
    }
}
