use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{ApiError, ApiResult},
    models::lunch::{
        CreateLunchDayRequest, CreateLunchWeekRequest, LunchDay, LunchDayCreated, LunchWeek,
        LunchWeekCreated, LunchWeekDetail, NewLunchDay, UpdateLunchDayRequest,
        UpdateLunchWeekRequest,
    },
    AppState,
};

const IDS_DO_NOT_MATCH: &str = "Bad request, IDs do not match";

fn parse_id(raw: &str) -> ApiResult<i32> {
    raw.parse()
        .map_err(|_| ApiError::Validation(format!("Invalid id '{raw}'")))
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::Validation(rejection.body_text()))
}

/// GET /lunch-week
pub async fn list_lunch_weeks(State(state): State<AppState>) -> ApiResult<Json<Vec<LunchWeek>>> {
    let weeks = state
        .store
        .list_weeks()
        .await
        .map_err(ApiError::store("Error getting Lunch Week List"))?;
    Ok(Json(weeks))
}

/// GET /lunch-week/{id}: the week plus its days. Two separate reads, not a transaction.
pub async fn get_lunch_week(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<LunchWeekDetail>> {
    let id = parse_id(&raw_id)?;
    let failed = || ApiError::store(format!("Error getting Lunch Week Id {raw_id}"));

    let Some(week) = state.store.get_week(id).await.map_err(failed())? else {
        return Err(ApiError::NotFound(format!(
            "Lunch Week Id {raw_id} not found"
        )));
    };
    let lunch_days = state.store.list_days(id).await.map_err(failed())?;

    Ok(Json(LunchWeekDetail { week, lunch_days }))
}

/// POST /lunch-week
pub async fn create_lunch_week(
    State(state): State<AppState>,
    body: Result<Json<CreateLunchWeekRequest>, JsonRejection>,
) -> ApiResult<Json<LunchWeekCreated>> {
    let req = json_body(body)?;
    let lunch_week_id = state
        .store
        .create_week(&req)
        .await
        .map_err(ApiError::store("Error creating Lunch Week"))?;
    tracing::info!(lunch_week_id, "lunch week created");
    Ok(Json(LunchWeekCreated { lunch_week_id }))
}

/// PUT /lunch-week/{id}
pub async fn update_lunch_week(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<UpdateLunchWeekRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&raw_id)?;
    let req = json_body(body)?;
    if id != req.lunch_week_id {
        return Err(ApiError::Validation(IDS_DO_NOT_MATCH.into()));
    }

    let week = LunchWeek {
        lunch_week_id: req.lunch_week_id,
        week_of: req.week_of,
        is_published: req.is_published,
    };
    state
        .store
        .update_week(id, &week)
        .await
        .map_err(ApiError::store("Error updating Lunch Week"))?;
    Ok(StatusCode::OK)
}

/// DELETE /lunch-week/{id}. Deleting an unknown id still succeeds.
pub async fn delete_lunch_week(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&raw_id)?;
    let affected = state
        .store
        .delete_week(id)
        .await
        .map_err(ApiError::store("Error deleting Lunch Week"))?;
    tracing::debug!(lunch_week_id = id, affected, "lunch week deleted");
    Ok(StatusCode::OK)
}

/// POST /lunch-week/{id}/lunch-day
pub async fn create_lunch_day(
    State(state): State<AppState>,
    Path(raw_week_id): Path<String>,
    body: Result<Json<CreateLunchDayRequest>, JsonRejection>,
) -> ApiResult<Json<LunchDayCreated>> {
    let path_week_id = parse_id(&raw_week_id)?;
    let req = json_body(body)?;

    let day = NewLunchDay {
        lunch_week_id: req.lunch_week_id.unwrap_or(path_week_id),
        day: req.day,
        menu_details: req.menu_details,
    };
    let lunch_day_id = state
        .store
        .create_day(&day)
        .await
        .map_err(ApiError::store("Error creating Lunch Day"))?;
    tracing::info!(lunch_day_id, lunch_week_id = day.lunch_week_id, "lunch day created");
    Ok(Json(LunchDayCreated { lunch_day_id }))
}

/// PUT /lunch-week/{id}/lunch-day/{day_id}
pub async fn update_lunch_day(
    State(state): State<AppState>,
    Path((raw_week_id, raw_day_id)): Path<(String, String)>,
    body: Result<Json<UpdateLunchDayRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    parse_id(&raw_week_id)?;
    let lunch_day_id = parse_id(&raw_day_id)?;
    let req = json_body(body)?;
    if lunch_day_id != req.lunch_day_id {
        return Err(ApiError::Validation(IDS_DO_NOT_MATCH.into()));
    }

    let day = LunchDay {
        lunch_day_id: req.lunch_day_id,
        lunch_week_id: req.lunch_week_id,
        day: req.day,
        menu_details: req.menu_details,
    };
    let affected = state
        .store
        .update_day(lunch_day_id, &day)
        .await
        .map_err(ApiError::store("Error updating Lunch Day"))?;
    tracing::debug!(lunch_day_id, affected, "lunch day updated");
    Ok(StatusCode::OK)
}
