pub mod activity;
pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod events;
pub mod fabrics;
pub mod health;
pub mod orders;
pub mod products;
pub mod upload;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/me                      current session user
/// /auth/logout                  logout
///
/// /users/me                     get, update own profile
///
/// /clients                      list, create
/// /clients/{id}                 get (with orders), update, delete
///
/// /fabrics                      list, create
/// /fabrics/{id}                 get, update, delete
/// /fabrics/{id}/stock           set stock level (PATCH)
///
/// /products                     list, create
/// /products/{id}                get, update, delete
///
/// /orders                       list, place
/// /orders/{id}                  get (with items), update, delete (?restock=)
///
/// /events                       list, create
/// /events/{id}                  get, update, delete
///
/// /dashboard/stats              aggregates (?range=7d|30d|6m|1y)
/// /activity-logs                recent activity feed
/// /upload                       image upload (multipart)
/// ```
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/clients", clients::router())
        .nest("/fabrics", fabrics::router())
        .nest("/products", products::router())
        .nest("/orders", orders::router())
        .nest("/events", events::router())
        .nest("/dashboard", dashboard::router())
        .nest("/activity-logs", activity::router())
        .nest("/upload", upload::router(max_upload_bytes))
}
