pub mod activity;
pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod events;
pub mod fabrics;
pub mod orders;
pub mod products;
pub mod upload;
pub mod users;
