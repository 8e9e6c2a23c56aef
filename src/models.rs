use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub password: String,
    pub display_name: String,
}

/// One stored check-in: canonical date plus the RFC 3339 instant it was made.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckInRow {
    pub wake_date: String,
    pub wake_time: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub nickname: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckInStatus {
    Created,
    AlreadyCheckedIn,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckInResponse {
    pub status: CheckInStatus,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wake_hour: Option<f64>,
}

/// One chart bucket. Gap days are emitted with `time = None` so the chart
/// shows a discontinuity instead of a compressed timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub day: String,
    pub date: String,
    pub time: Option<f64>,
    pub has_data: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrendResponse {
    pub range: String,
    pub points: Vec<TrendPoint>,
    pub checked_in_today: bool,
}

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    pub range: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}
