//! Concrete database adapters implementing the repository traits
//! defined in the domain layer.

pub mod postgres;
pub mod product_repository;
pub mod user_repository;

pub use postgres::{PostgresConfig, PostgresGateway};
pub use product_repository::PostgresProductRepository;
pub use user_repository::PostgresUserRepository;
