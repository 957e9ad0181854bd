//! Application layer containing business logic and shared state.

pub mod config;
pub mod product_service;
pub mod state;
pub mod user_service;

pub use config::AppConfig;
pub use product_service::ProductService;
pub use state::AppState;
pub use user_service::UserService;
