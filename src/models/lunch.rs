use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A week of school lunches, keyed by the Monday it starts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LunchWeek {
    pub lunch_week_id: i32,
    pub week_of: NaiveDate,
    pub is_published: bool,
}

/// One served day inside a lunch week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LunchDay {
    pub lunch_day_id: i32,
    pub lunch_week_id: i32,
    pub day: NaiveDate,
    pub menu_details: Option<String>,
}

/// Body for GET /lunch-week/{id}: the week with its days attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LunchWeekDetail {
    #[serde(flatten)]
    pub week: LunchWeek,
    pub lunch_days: Vec<LunchDay>,
}

/// Body for POST /lunch-week. Any `lunchWeekId` sent by the client is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLunchWeekRequest {
    pub week_of: NaiveDate,
    #[serde(default)]
    pub is_published: bool,
}

/// Body for PUT /lunch-week/{id}. Overwrites every column of the row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLunchWeekRequest {
    pub lunch_week_id: i32,
    pub week_of: NaiveDate,
    pub is_published: bool,
}

/// Body for POST /lunch-week/{id}/lunch-day.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLunchDayRequest {
    /// Falls back to the week id in the path when absent.
    pub lunch_week_id: Option<i32>,
    pub day: NaiveDate,
    pub menu_details: Option<String>,
}

/// Body for PUT /lunch-week/{id}/lunch-day/{day_id}.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLunchDayRequest {
    pub lunch_day_id: i32,
    pub lunch_week_id: i32,
    pub day: NaiveDate,
    pub menu_details: Option<String>,
}

/// Row values for a new lunch day, after the owning week has been resolved.
#[derive(Debug, Clone)]
pub struct NewLunchDay {
    pub lunch_week_id: i32,
    pub day: NaiveDate,
    pub menu_details: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LunchWeekCreated {
    pub lunch_week_id: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LunchDayCreated {
    pub lunch_day_id: i32,
}
