use crate::auth;
use crate::handlers;
use crate::state::AppState;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/me", get(handlers::me))
        .route("/api/checkin", post(handlers::check_in))
        .route("/api/trend", get(handlers::get_trend))
        .route("/api/profile/name", post(handlers::rename))
        .route("/api/profile/password", post(handlers::reset_password))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/register", post(handlers::register))
        .route("/api/login", post(handlers::login))
        .merge(protected)
        .with_state(state)
}
