//! The API layer, containing web handlers and routing.

pub mod error;
pub mod health;
pub mod products;
pub mod router;
pub mod users;

pub use router::create_router;
