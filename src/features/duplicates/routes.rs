use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::duplicates::handlers::{resolve_duplicates, scan_duplicates};
use crate::features::duplicates::services::DuplicateService;

/// Admin duplicate routes, mounted under `/api/admin`
pub fn admin_routes(service: Arc<DuplicateService>) -> Router {
    Router::new()
        .route("/duplicates", get(scan_duplicates))
        .route("/duplicates/resolve", post(resolve_duplicates))
        .with_state(service)
}
