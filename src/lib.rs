pub mod app;
pub mod auth;
pub mod checkin;
pub mod clock;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod profile;
pub mod state;
pub mod store;
pub mod trend;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use store::Database;
