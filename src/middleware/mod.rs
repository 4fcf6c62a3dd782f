//! Request pipeline: trace id propagation and bearer authentication.

pub mod auth;
pub mod trace;
