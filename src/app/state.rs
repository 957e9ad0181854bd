//! Application state management.
//!
//! This module provides the shared application state that is
//! accessible to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::domain::{HealthProbe, ProductRepository, UserRepository};

use super::product_service::ProductService;
use super::user_service::UserService;

/// Shared application state for the Axum web server.
///
/// Holds the two services and the database health probe behind `Arc`,
/// so handlers can use them without knowing the concrete repository
/// implementations. Everything inside is `Send + Sync`; the state is
/// cloned freely across async tasks.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub product_service: Arc<ProductService>,
    pub health_probe: Arc<dyn HealthProbe>,
}

impl AppState {
    /// Wires the services to the provided repositories.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        product_repository: Arc<dyn ProductRepository>,
        health_probe: Arc<dyn HealthProbe>,
    ) -> Self {
        Self {
            user_service: Arc::new(UserService::new(user_repository)),
            product_service: Arc::new(ProductService::new(product_repository)),
            health_probe,
        }
    }
}
