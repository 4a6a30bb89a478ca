//! Row models and DTOs.
//!
//! Each submodule contains:
//! - a `FromRow` + `Serialize` struct matching the database row
//! - a `Deserialize` create DTO for inserts
//! - a `Deserialize` update DTO (all `Option` fields) for partial updates
//!
//! JSON field names are camelCase to match the dashboard frontend.

pub mod activity_log;
pub mod client;
pub mod dashboard;
pub mod event;
pub mod fabric;
pub mod order;
pub mod product;
pub mod user;
