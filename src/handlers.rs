use crate::cycle::{resolve_presses, run_cycle, LogUpdate};
use crate::errors::AppError;
use crate::models::{
    CycleRequest, MetersPerWalk, Presses, SeriesResponse, StateQuery, TrackerResponse, WalkForm,
};
use crate::state::AppState;
use crate::stats::today_meters;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form, Json,
};
use chrono::{Local, NaiveDate};
use tracing::info;

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<StateQuery>,
) -> Result<Html<String>, AppError> {
    let meters = meters_per_walk(query.meters_per_walk)?;
    let view = apply_cycle(&state, meters, Presses::default()).await?;
    Ok(Html(render_index(&view)))
}

pub async fn get_state(
    State(state): State<AppState>,
    Query(query): Query<StateQuery>,
) -> Result<Json<TrackerResponse>, AppError> {
    let meters = meters_per_walk(query.meters_per_walk)?;
    Ok(Json(apply_cycle(&state, meters, Presses::default()).await?))
}

pub async fn get_series(State(state): State<AppState>) -> Result<Json<SeriesResponse>, AppError> {
    Ok(Json(state.log.render_series().await?))
}

pub async fn cycle(
    State(state): State<AppState>,
    Json(payload): Json<CycleRequest>,
) -> Result<Json<TrackerResponse>, AppError> {
    let meters = meters_per_walk(payload.meters_per_walk)?;
    let presses = resolve_presses(payload.actions.as_slice())?;
    Ok(Json(apply_cycle(&state, meters, presses).await?))
}

pub async fn walk_r(
    State(state): State<AppState>,
    Form(form): Form<WalkForm>,
) -> Result<Redirect, AppError> {
    let presses = Presses {
        press_r: true,
        ..Presses::default()
    };
    form_cycle(&state, form, presses).await
}

pub async fn walk_o(
    State(state): State<AppState>,
    Form(form): Form<WalkForm>,
) -> Result<Redirect, AppError> {
    let presses = Presses {
        press_o: true,
        ..Presses::default()
    };
    form_cycle(&state, form, presses).await
}

pub async fn reset(
    State(state): State<AppState>,
    Form(form): Form<WalkForm>,
) -> Result<Redirect, AppError> {
    let presses = Presses {
        press_reset: true,
        ..Presses::default()
    };
    form_cycle(&state, form, presses).await
}

async fn form_cycle(state: &AppState, form: WalkForm, presses: Presses) -> Result<Redirect, AppError> {
    let meters = meters_per_walk(form.meters_per_walk)?;
    apply_cycle(state, meters, presses).await?;
    Ok(Redirect::to(&format!("/?meters_per_walk={}", meters.get())))
}

/// Load, mutate and save both stores for one interaction.
///
/// The counter is written before the log; an interruption between the two
/// writes leaves them out of step.
async fn apply_cycle(
    state: &AppState,
    meters: MetersPerWalk,
    presses: Presses,
) -> Result<TrackerResponse, AppError> {
    let _guard = state.cycle_lock.lock().await;
    let today = today();

    let previous = state.counter.load().await?;
    let outcome = run_cycle(previous, meters, presses);

    if outcome.count != previous || presses.press_reset {
        state.counter.save(outcome.count).await?;
    }

    let log = state.log.apply_update(today, outcome.log_update).await?;
    if outcome.log_update != LogUpdate::None {
        info!(
            "cycle on {today}: clicks={} count={} reset={}",
            outcome.clicks, outcome.count, presses.press_reset
        );
    }

    Ok(TrackerResponse {
        date: today.to_string(),
        count: outcome.count,
        meters_per_walk: meters.get(),
        total_meters: outcome.total_meters,
        today_meters: today_meters(&log, today),
        clicks: outcome.clicks,
    })
}

fn meters_per_walk(value: Option<i64>) -> Result<MetersPerWalk, AppError> {
    match value {
        None => Ok(MetersPerWalk::default()),
        Some(value) => u32::try_from(value)
            .ok()
            .and_then(MetersPerWalk::new)
            .ok_or_else(|| AppError::bad_request("meters_per_walk must be between 0 and 100")),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn meters_per_walk_defaults_when_absent() {
        assert_eq!(meters_per_walk(None).unwrap().get(), 10);
        assert_eq!(meters_per_walk(Some(0)).unwrap().get(), 0);
        assert_eq!(meters_per_walk(Some(100)).unwrap().get(), 100);
    }

    #[test]
    fn meters_per_walk_outside_slider_range_is_bad_request() {
        for value in [-5, -1, 101, i64::MAX, i64::MIN] {
            let err = meters_per_walk(Some(value)).unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST, "value {value}");
        }
    }
}
