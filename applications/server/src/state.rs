/// Shared application state
use crate::{config::PaginationSettings, services::AuthService};
use std::sync::Arc;
use vidshare_core::StorageContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn StorageContext>,
    pub auth_service: Arc<AuthService>,
    pub pagination: PaginationSettings,
}

impl AppState {
    pub fn new(
        db: Arc<dyn StorageContext>,
        auth_service: Arc<AuthService>,
        pagination: PaginationSettings,
    ) -> Self {
        Self {
            db,
            auth_service,
            pagination,
        }
    }
}
