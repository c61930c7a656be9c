/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - db: PgPool, auth: AuthService (basic variant では None)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::AuthService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub auth: Option<Arc<AuthService>>,
}

impl AppState {
    pub fn new(db: sqlx::PgPool, auth: Option<Arc<AuthService>>) -> Self {
        Self { db, auth }
    }

    pub fn auth_enabled(&self) -> bool {
        self.auth.is_some()
    }
}
