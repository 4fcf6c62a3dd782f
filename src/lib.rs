pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

use std::sync::Arc;

use services::auth::JwtAuth;
use services::PortalService;

/// Shared application state passed to all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn PortalService>,
    pub auth: Arc<JwtAuth>,
}

impl AppState {
    pub fn new(service: Arc<dyn PortalService>, auth: Arc<JwtAuth>) -> Self {
        Self { service, auth }
    }
}
