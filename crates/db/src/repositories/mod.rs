//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Helpers that must run inside an
//! enclosing transaction take `&mut PgConnection` instead.

pub mod activity_log_repo;
pub mod client_repo;
pub mod dashboard_repo;
pub mod event_repo;
pub mod fabric_repo;
pub mod order_repo;
pub mod product_repo;
pub mod user_repo;

pub use activity_log_repo::ActivityLogRepo;
pub use client_repo::ClientRepo;
pub use dashboard_repo::DashboardRepo;
pub use event_repo::EventRepo;
pub use fabric_repo::{DeductOutcome, FabricRepo};
pub use order_repo::{OrderRepo, PlaceOrderError};
pub use product_repo::ProductRepo;
pub use user_repo::UserRepo;
