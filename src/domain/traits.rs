//! Domain traits defining contracts for the persistence layer.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::error::AppError;
use super::types::{NewProduct, NewUser, Product, User};

/// Query and mutation operations for users.
///
/// Implementations must convert a unique-constraint violation on insert or
/// update into [`AppError::Conflict`]; the service-layer uniqueness check is
/// a fast path only, the store constraint is the authoritative guard.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user, assigning its identity and timestamps.
    async fn save(&self, user: &NewUser) -> Result<User, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// At most one match; first match wins if the store is inconsistent.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// At most one match; first match wins if the store is inconsistent.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_all(&self) -> Result<Vec<User>, AppError>;

    /// Persist the given row, refreshing `updated_at`.
    async fn update(&self, user: &User) -> Result<User, AppError>;

    /// Delete by identity. No-op when the id does not exist.
    async fn delete_by_id(&self, id: i64) -> Result<(), AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}

/// Query and mutation operations for products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product, assigning its identity and timestamps.
    async fn save(&self, product: &NewProduct) -> Result<Product, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError>;

    async fn find_all(&self) -> Result<Vec<Product>, AppError>;

    /// Exact category match.
    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>, AppError>;

    /// Products with `price <= max_price`, ascending by price.
    async fn find_by_max_price(&self, max_price: Decimal) -> Result<Vec<Product>, AppError>;

    /// Products with `quantity > 0`.
    async fn find_in_stock(&self) -> Result<Vec<Product>, AppError>;

    /// Persist the given row, refreshing `updated_at`.
    async fn update(&self, product: &Product) -> Result<Product, AppError>;

    /// Delete by identity. No-op when the id does not exist.
    async fn delete_by_id(&self, id: i64) -> Result<(), AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}

/// Connectivity probe backing the health endpoint.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn ping(&self) -> Result<(), AppError>;
}
