use crate::errors::AppError;
use crate::models::{DailyLog, MetersPerWalk, Presses};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogUpdate {
    None,
    Add(u64),
    ResetToday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleOutcome {
    pub count: u64,
    pub clicks: u64,
    pub log_update: LogUpdate,
    pub total_meters: u64,
}

pub fn resolve_presses<S: AsRef<str>>(actions: &[S]) -> Result<Presses, AppError> {
    let mut presses = Presses::default();
    for action in actions {
        match action.as_ref().trim().to_lowercase().as_str() {
            "r" => presses.press_r = true,
            "o" | "ø" => presses.press_o = true,
            "reset" => presses.press_reset = true,
            other => {
                return Err(AppError::bad_request(format!(
                    "unknown action '{other}', expected 'r', 'o' or 'reset'"
                )));
            }
        }
    }
    Ok(presses)
}

/// One interaction cycle over the previously persisted count.
///
/// Reset wins over any walk presses seen in the same cycle and never
/// counts as a walk itself. Every click is priced at the current
/// `meters_per_walk`.
pub fn run_cycle(previous_count: u64, meters_per_walk: MetersPerWalk, presses: Presses) -> CycleOutcome {
    let meters = u64::from(meters_per_walk.get());

    if presses.press_reset {
        return CycleOutcome {
            count: 0,
            clicks: 0,
            log_update: LogUpdate::ResetToday,
            total_meters: 0,
        };
    }

    let clicks = u64::from(presses.press_r) + u64::from(presses.press_o);
    let count = previous_count.saturating_add(clicks);
    let log_update = if clicks > 0 {
        LogUpdate::Add(clicks.saturating_mul(meters))
    } else {
        LogUpdate::None
    };

    CycleOutcome {
        count,
        clicks,
        log_update,
        total_meters: total_meters(count, meters_per_walk),
    }
}

pub fn total_meters(count: u64, meters_per_walk: MetersPerWalk) -> u64 {
    count.saturating_mul(u64::from(meters_per_walk.get()))
}

pub fn apply(update: LogUpdate, today: NaiveDate, log: &mut DailyLog) {
    match update {
        LogUpdate::None => {}
        LogUpdate::Add(delta) => {
            log.add(today, delta);
        }
        LogUpdate::ResetToday => log.set(today, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meters(value: u32) -> MetersPerWalk {
        MetersPerWalk::new(value).unwrap()
    }

    fn press(r: bool, o: bool, reset: bool) -> Presses {
        Presses {
            press_r: r,
            press_o: o,
            press_reset: reset,
        }
    }

    #[test]
    fn single_r_press_from_empty_state() {
        let outcome = run_cycle(0, meters(10), press(true, false, false));
        assert_eq!(outcome.count, 1);
        assert_eq!(outcome.clicks, 1);
        assert_eq!(outcome.log_update, LogUpdate::Add(10));
        assert_eq!(outcome.total_meters, 10);
    }

    #[test]
    fn both_buttons_in_one_cycle_count_twice_at_current_rate() {
        let outcome = run_cycle(3, meters(25), press(true, true, false));
        assert_eq!(outcome.count, 5);
        assert_eq!(outcome.clicks, 2);
        assert_eq!(outcome.log_update, LogUpdate::Add(50));
        assert_eq!(outcome.total_meters, 125);
    }

    #[test]
    fn reset_wins_and_is_not_a_walk() {
        let outcome = run_cycle(9, meters(10), press(true, true, true));
        assert_eq!(outcome.count, 0);
        assert_eq!(outcome.clicks, 0);
        assert_eq!(outcome.log_update, LogUpdate::ResetToday);
        assert_eq!(outcome.total_meters, 0);
    }

    #[test]
    fn slider_move_only_recomputes_total() {
        let outcome = run_cycle(7, meters(40), Presses::default());
        assert_eq!(outcome.count, 7);
        assert_eq!(outcome.log_update, LogUpdate::None);
        assert_eq!(outcome.total_meters, 280);
    }

    #[test]
    fn total_is_count_times_rate_across_slider_range() {
        for rate in 0..=100 {
            for (r, o) in [(false, false), (true, false), (false, true), (true, true)] {
                let outcome = run_cycle(12, meters(rate), press(r, o, false));
                assert_eq!(outcome.total_meters, outcome.count * u64::from(rate));
            }
        }
    }

    #[test]
    fn press_then_reset_over_two_cycles() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut log = DailyLog::default();
        log.add(yesterday, 120);
        log.add(today, 30);

        let first = run_cycle(5, meters(10), press(false, true, false));
        apply(first.log_update, today, &mut log);
        assert_eq!(first.count, 6);
        assert_eq!(log.get(today), Some(40));

        let second = run_cycle(first.count, meters(10), press(false, false, true));
        apply(second.log_update, today, &mut log);
        assert_eq!(second.count, 0);
        assert_eq!(log.get(today), Some(0));
        assert_eq!(log.get(yesterday), Some(120));
    }

    #[test]
    fn resolve_presses_accepts_known_actions() {
        let presses = resolve_presses(&[" R ", "Ø"]).unwrap();
        assert!(presses.press_r);
        assert!(presses.press_o);
        assert!(!presses.press_reset);

        let presses = resolve_presses(&["reset"]).unwrap();
        assert!(presses.press_reset);

        let empty: [&str; 0] = [];
        assert_eq!(resolve_presses(&empty).unwrap(), Presses::default());
    }

    #[test]
    fn resolve_presses_rejects_unknown_action() {
        let err = resolve_presses(&["jump"]).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
    }
}
