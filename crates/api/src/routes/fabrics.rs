//! Route definitions for the `/fabrics` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::fabrics;
use crate::state::AppState;

/// Routes mounted at `/fabrics`.
///
/// ```text
/// GET    /             -> list_fabrics
/// POST   /             -> create_fabric
/// GET    /{id}         -> get_fabric
/// PUT    /{id}         -> update_fabric
/// DELETE /{id}         -> delete_fabric
/// PATCH  /{id}/stock   -> set_stock
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fabrics::list_fabrics).post(fabrics::create_fabric))
        .route(
            "/{id}",
            get(fabrics::get_fabric)
                .put(fabrics::update_fabric)
                .delete(fabrics::delete_fabric),
        )
        .route("/{id}/stock", patch(fabrics::set_stock))
}
