//! Domain layer containing core business types, traits, and error definitions.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{AppError, ConfigError, DatabaseError};
pub use traits::{HealthProbe, ProductRepository, UserRepository};
pub use types::{
    CountResponse, CreateProductRequest, CreateUserRequest, ErrorResponse, HealthResponse,
    HealthStatus, NewProduct, NewUser, Product, UpdateProductRequest, UpdateUserRequest, User,
};
