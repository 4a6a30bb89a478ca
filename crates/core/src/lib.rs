//! Domain logic for the StitchFlow shop backend.
//!
//! Everything in this crate is pure: no database or network access. The
//! `db` crate persists what these modules derive, and the `api` crate maps
//! [`error::CoreError`] onto HTTP responses.

pub mod activity;
pub mod calendar;
pub mod error;
pub mod inventory;
pub mod order;
pub mod reporting;
pub mod storage;
pub mod types;
pub mod validation;
