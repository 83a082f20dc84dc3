use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::professionals::handlers;
use crate::features::professionals::services::ProfessionalService;

/// Public directory routes
pub fn routes(service: Arc<ProfessionalService>) -> Router {
    Router::new()
        .route("/api/professionals", get(handlers::list_professionals))
        .route("/api/professionals/{id}", get(handlers::get_professional))
        .with_state(service)
}

/// Admin professional routes, mounted under `/api/admin`
pub fn admin_routes(service: Arc<ProfessionalService>) -> Router {
    Router::new()
        .route(
            "/professionals",
            get(handlers::list_professionals).post(handlers::create_professional),
        )
        .route(
            "/professionals/{id}",
            get(handlers::admin_get_professional)
                .put(handlers::update_professional)
                .delete(handlers::delete_professional),
        )
        .route(
            "/professionals/bulk/availability",
            post(handlers::bulk_set_availability),
        )
        .route(
            "/professionals/bulk/delete",
            post(handlers::bulk_delete_professionals),
        )
        .with_state(service)
}
