use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::imports::handlers;
use crate::features::imports::services::ImportService;

/// Admin import routes, mounted under `/api/admin`
pub fn admin_routes(service: Arc<ImportService>) -> Router {
    // Leave room for multipart framing around the file itself
    let upload_limit = service.max_file_size() + 64 * 1024;
    // Reviewed rows come back as JSON objects, which repeat every column name
    let rows_limit = service.max_file_size() * 4;

    Router::new()
        .route(
            "/imports/{target}/validate",
            post(handlers::validate_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/imports/{target}/revalidate",
            post(handlers::revalidate_rows),
        )
        .route(
            "/imports/professionals/domains",
            post(handlers::create_missing_domains),
        )
        .route("/imports/{target}/commit", post(handlers::commit_rows))
        .route(
            "/imports/{target}/template",
            get(handlers::download_template),
        )
        .layer(DefaultBodyLimit::max(rows_limit))
        .with_state(service)
}
