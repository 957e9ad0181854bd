//! Infrastructure layer implementations.

pub mod database;

pub use database::{
    PostgresConfig, PostgresGateway, PostgresProductRepository, PostgresUserRepository,
};
