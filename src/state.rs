use crate::store::Database;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(db: Database, jwt_secret: String) -> Self {
        Self {
            db: Arc::new(db),
            jwt_secret: jwt_secret.into(),
        }
    }
}
