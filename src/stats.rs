use crate::models::{DailyLog, SeriesPoint, SeriesResponse};
use chrono::NaiveDate;

pub fn build_series(log: &DailyLog) -> SeriesResponse {
    let mut entries = log.entries().to_vec();
    entries.sort_by_key(|entry| entry.date);

    let total_meters = entries
        .iter()
        .fold(0u64, |acc, entry| acc.saturating_add(entry.meters));

    let points = entries
        .into_iter()
        .map(|entry| SeriesPoint {
            date: date_key(entry.date),
            meters: entry.meters,
        })
        .collect::<Vec<_>>();

    SeriesResponse {
        days_recorded: points.len(),
        points,
        total_meters,
    }
}

pub fn today_meters(log: &DailyLog, today: NaiveDate) -> u64 {
    log.get(today).unwrap_or_default()
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
