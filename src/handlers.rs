use crate::calendar::DateKey;
use crate::errors::AppError;
use crate::habits::{self, HabitAction, NameError};
use crate::models::{
    AddHabitForm, AddHabitRequest, ClearForm, ClearRequest, Filter, FilterForm, FilterRequest,
    Habit, HabitActionForm, HabitData, HabitListResponse, IndexQuery,
};
use crate::state::AppState;
use crate::ui::{render_clear_confirm, render_index, Notice};
use crate::view::build_view_at;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use chrono::Utc;
use tracing::info;

pub async fn index(State(state): State<AppState>, Query(query): Query<IndexQuery>) -> Html<String> {
    let notice = query.notice.as_deref().and_then(Notice::parse);
    let data = state.data.lock().await;
    Html(render_index(&build_view_at(DateKey::today(), &data), notice))
}

pub async fn add_habit_form(
    State(state): State<AppState>,
    Form(form): Form<AddHabitForm>,
) -> Result<Redirect, AppError> {
    let notice = match create_habit(&state, &form.name).await? {
        Ok(_) => Notice::Added,
        Err(err) => Notice::from(err),
    };
    Ok(Redirect::to(&notice.location()))
}

pub async fn habit_action_form(
    State(state): State<AppState>,
    Form(form): Form<HabitActionForm>,
) -> Result<Redirect, AppError> {
    let action = form.action.as_deref().and_then(HabitAction::parse);
    if let (Some(action), Some(id)) = (action, form.id.as_deref()) {
        apply_action(&state, action, id).await?;
    }
    Ok(Redirect::to("/"))
}

pub async fn filter_form(
    State(state): State<AppState>,
    Form(form): Form<FilterForm>,
) -> Result<Redirect, AppError> {
    if let Some(filter) = form.filter.as_deref().and_then(Filter::parse) {
        change_filter(&state, filter).await?;
    }
    Ok(Redirect::to("/"))
}

pub async fn clear_prompt(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    Html(render_clear_confirm(data.habits.len()))
}

pub async fn clear_form(
    State(state): State<AppState>,
    Form(form): Form<ClearForm>,
) -> Result<Redirect, AppError> {
    if form.confirm.as_deref() != Some("yes") {
        return Ok(Redirect::to("/"));
    }
    clear_all(&state).await?;
    Ok(Redirect::to(&Notice::Cleared.location()))
}

pub async fn list_habits(State(state): State<AppState>) -> Json<HabitListResponse> {
    let data = state.data.lock().await;
    Json(build_view_at(DateKey::today(), &data))
}

pub async fn create_habit_api(
    State(state): State<AppState>,
    Json(payload): Json<AddHabitRequest>,
) -> Result<(StatusCode, Json<Habit>), AppError> {
    let habit = create_habit(&state, &payload.name).await??;
    Ok((StatusCode::CREATED, Json(habit)))
}

pub async fn habit_action_api(
    State(state): State<AppState>,
    Path((id, action)): Path<(String, String)>,
) -> Result<Json<HabitListResponse>, AppError> {
    let action = match HabitAction::parse(&action) {
        Some(HabitAction::Delete) | None => {
            return Err(AppError::bad_request(
                "action must be 'toggle', 'archive' or 'restore'",
            ));
        }
        Some(action) => action,
    };
    Ok(Json(apply_action(&state, action, &id).await?))
}

pub async fn delete_habit_api(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HabitListResponse>, AppError> {
    Ok(Json(apply_action(&state, HabitAction::Delete, &id).await?))
}

pub async fn set_filter_api(
    State(state): State<AppState>,
    Json(payload): Json<FilterRequest>,
) -> Result<Json<HabitListResponse>, AppError> {
    let Some(filter) = Filter::parse(&payload.filter) else {
        return Err(AppError::bad_request(
            "filter must be 'active', 'all' or 'archived'",
        ));
    };
    Ok(Json(change_filter(&state, filter).await?))
}

pub async fn clear_api(
    State(state): State<AppState>,
    Json(payload): Json<ClearRequest>,
) -> Result<Json<HabitListResponse>, AppError> {
    if !payload.confirm {
        let data = state.data.lock().await;
        return Ok(Json(build_view_at(DateKey::today(), &data)));
    }
    Ok(Json(clear_all(&state).await?))
}

/// Validates `raw`, then inserts and persists the habit. The outer error is
/// a storage failure; the inner one a rejected name. Neither changes the
/// in-memory data.
async fn create_habit(state: &AppState, raw: &str) -> Result<Result<Habit, NameError>, AppError> {
    let mut data = state.data.lock().await;
    let name = match habits::validate_new_name(raw, &data.habits) {
        Ok(name) => name,
        Err(err) => return Ok(Err(err)),
    };

    let mut next = data.clone();
    let habit = habits::add_habit(&mut next, name, Utc::now()).clone();
    commit(state, &mut data, next).await?;
    info!(id = %habit.id, name = %habit.name, "habit added");
    Ok(Ok(habit))
}

async fn apply_action(
    state: &AppState,
    action: HabitAction,
    id: &str,
) -> Result<HabitListResponse, AppError> {
    let today = DateKey::today();
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    if habits::apply_action(&mut next, action, id, today) {
        commit(state, &mut data, next).await?;
        info!(id, action = action.as_str(), "habit updated");
    }
    Ok(build_view_at(today, &data))
}

async fn change_filter(state: &AppState, filter: Filter) -> Result<HabitListResponse, AppError> {
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    if habits::set_filter(&mut next, filter) {
        commit(state, &mut data, next).await?;
    }
    Ok(build_view_at(DateKey::today(), &data))
}

async fn clear_all(state: &AppState) -> Result<HabitListResponse, AppError> {
    let mut data = state.data.lock().await;
    let removed = data.habits.len();
    let mut next = data.clone();
    habits::clear_habits(&mut next);
    commit(state, &mut data, next).await?;
    info!(removed, "all habits cleared");
    Ok(build_view_at(DateKey::today(), &data))
}

/// Persists `next` and only then makes it the live state, so a failed
/// write leaves memory matching the file.
async fn commit(state: &AppState, data: &mut HabitData, next: HabitData) -> Result<(), AppError> {
    state.store.save(&next).await?;
    *data = next;
    Ok(())
}
