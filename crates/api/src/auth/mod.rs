//! Authentication: signed session tokens and Google sign-in.

pub mod google;
pub mod session;
