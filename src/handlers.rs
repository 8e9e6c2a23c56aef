use crate::auth::{self, Claims};
use crate::checkin::{self, CheckInOutcome};
use crate::clock;
use crate::errors::AppError;
use crate::models::{
    AuthResponse, CheckInResponse, CheckInStatus, LoginRequest, OkResponse, PasswordRequest,
    RegisterRequest, RenameRequest, TrendQuery, TrendResponse, UserInfo, UserRow,
};
use crate::profile;
use crate::state::AppState;
use crate::trend::{self, Window};
use crate::ui;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

pub async fn index() -> Html<&'static str> {
    Html(ui::INDEX_HTML)
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = payload.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation("a valid email address is required"));
    }
    profile::validate_display_name(&payload.nickname)?;
    profile::validate_password(&payload.password)?;

    let user_id = Uuid::new_v4();
    let user = UserRow {
        id: user_id.to_string(),
        email,
        password: auth::hash_password(&payload.password)?,
        display_name: payload.nickname,
    };
    state.db.create_user(&user)?;
    info!("registered user {user_id}");

    let token = auth::create_token(&state.jwt_secret, user_id)?;
    Ok(Json(AuthResponse {
        token,
        user: UserInfo {
            id: user_id,
            email: user.email,
            display_name: user.display_name,
        },
    }))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = payload.email.trim().to_lowercase();
    let user = state
        .db
        .user_by_email(&email)?
        .ok_or_else(|| AppError::auth("invalid email or password"))?;
    auth::verify_password(&payload.password, &user.password)?;

    let user_id = parse_user_id(&user.id)?;
    let token = auth::create_token(&state.jwt_secret, user_id)?;
    Ok(Json(AuthResponse {
        token,
        user: UserInfo {
            id: user_id,
            email: user.email,
            display_name: user.display_name,
        },
    }))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserInfo>, AppError> {
    let user = state
        .db
        .user_by_id(&claims.sub.to_string())?
        .ok_or_else(|| AppError::auth("account no longer exists"))?;
    Ok(Json(UserInfo {
        id: claims.sub,
        email: user.email,
        display_name: user.display_name,
    }))
}

pub async fn check_in(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<CheckInResponse>, AppError> {
    let user_id = claims.sub.to_string();
    match checkin::record_check_in(&state.db, &user_id)? {
        CheckInOutcome::Created(row) => {
            info!("user {user_id} checked in for {}", row.wake_date);
            let wake_hour = DateTime::parse_from_rfc3339(&row.wake_time)
                .ok()
                .map(|ts| clock::hour_of(ts.with_timezone(&Utc)));
            Ok(Json(CheckInResponse {
                status: CheckInStatus::Created,
                date: row.wake_date,
                wake_hour,
            }))
        }
        CheckInOutcome::AlreadyCheckedIn => Ok(Json(CheckInResponse {
            status: CheckInStatus::AlreadyCheckedIn,
            date: clock::today_string(),
            wake_hour: None,
        })),
    }
}

pub async fn get_trend(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<TrendResponse>, AppError> {
    let window = match query.range.as_deref() {
        None => Window::Week,
        Some(value) => Window::parse(value)
            .ok_or_else(|| AppError::validation("range must be week, month or year"))?,
    };
    let response = trend::fetch_series(&state.db, &claims.sub.to_string(), window)?;
    Ok(Json(response))
}

pub async fn rename(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<RenameRequest>,
) -> Result<Json<OkResponse>, AppError> {
    profile::rename_display_name(&state.db, &claims.sub.to_string(), &payload.display_name)?;
    Ok(Json(OkResponse::new()))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<PasswordRequest>,
) -> Result<Json<OkResponse>, AppError> {
    profile::reset_credential(&state.db, &claims.sub.to_string(), &payload.password)?;
    Ok(Json(OkResponse::new()))
}

fn parse_user_id(id: &str) -> Result<Uuid, AppError> {
    id.parse()
        .map_err(|_| AppError::internal("stored user id is not a uuid"))
}
