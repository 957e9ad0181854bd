//! In-memory mock implementations of the repository traits.
//!
//! The mocks mirror the Postgres adapters' behavior closely enough for the
//! service and router tests: identities are assigned from a sequence, the
//! unique-constraint backstop on usernames and emails is emulated, and
//! every mock can be switched into a failing mode.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::app::AppState;
use crate::domain::{
    AppError, DatabaseError, HealthProbe, NewProduct, NewUser, Product, ProductRepository, User,
    UserRepository,
};

/// Shared failure switch for the mocks.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    pub should_fail: bool,
    pub error_message: Option<String>,
}

impl MockConfig {
    #[must_use]
    pub fn success() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            should_fail: true,
            error_message: Some(message.into()),
        }
    }

    fn check(&self) -> Result<(), AppError> {
        if self.should_fail {
            let msg = self
                .error_message
                .clone()
                .unwrap_or_else(|| "mock database error".to_string());
            return Err(AppError::Database(DatabaseError::Query(msg)));
        }
        Ok(())
    }
}

/// In-memory user store keyed by id.
pub struct InMemoryUserRepository {
    rows: Mutex<BTreeMap<i64, User>>,
    next_id: AtomicI64,
    config: MockConfig,
}

impl InMemoryUserRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MockConfig::success())
    }

    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
            config,
        }
    }

    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_config(MockConfig::failure(message))
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &NewUser) -> Result<User, AppError> {
        self.config.check()?;

        let mut rows = self.rows.lock().unwrap();
        // Unique-constraint backstop, as the database would enforce it
        if rows.values().any(|u| u.username == user.username) {
            return Err(AppError::Conflict("username already exists".to_string()));
        }
        if rows.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("email already exists".to_string()));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let now = Utc::now();
        let stored = User {
            id,
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            created_at: now,
            updated_at: now,
        };
        rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        self.config.check()?;
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.config.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.config.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        self.config.check()?;
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        self.config.check()?;

        let mut rows = self.rows.lock().unwrap();
        if rows
            .values()
            .any(|u| u.id != user.id && u.username == user.username)
        {
            return Err(AppError::Conflict("username already exists".to_string()));
        }
        if rows.values().any(|u| u.id != user.id && u.email == user.email) {
            return Err(AppError::Conflict("email already exists".to_string()));
        }

        if !rows.contains_key(&user.id) {
            return Err(AppError::NotFound(format!(
                "user not found with id: {}",
                user.id
            )));
        }

        let updated = User {
            updated_at: Utc::now(),
            ..user.clone()
        };
        rows.insert(user.id, updated.clone());
        Ok(updated)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        self.config.check()?;
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.config.check()?;
        Ok(self.rows.lock().unwrap().len() as i64)
    }
}

/// In-memory product store keyed by id.
pub struct InMemoryProductRepository {
    rows: Mutex<BTreeMap<i64, Product>>,
    next_id: AtomicI64,
    config: MockConfig,
}

impl InMemoryProductRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MockConfig::success())
    }

    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
            config,
        }
    }

    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_config(MockConfig::failure(message))
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn save(&self, product: &NewProduct) -> Result<Product, AppError> {
        self.config.check()?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let now = Utc::now();
        let stored = Product {
            id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            quantity: product.quantity,
            category: product.category.clone(),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError> {
        self.config.check()?;
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        self.config.check()?;
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>, AppError> {
        self.config.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.category.as_deref() == Some(category))
            .cloned()
            .collect())
    }

    async fn find_by_max_price(&self, max_price: Decimal) -> Result<Vec<Product>, AppError> {
        self.config.check()?;
        let mut matches: Vec<Product> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.price <= max_price)
            .cloned()
            .collect();
        matches.sort_by_key(|p| p.price);
        Ok(matches)
    }

    async fn find_in_stock(&self) -> Result<Vec<Product>, AppError> {
        self.config.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.quantity > 0)
            .cloned()
            .collect())
    }

    async fn update(&self, product: &Product) -> Result<Product, AppError> {
        self.config.check()?;

        let mut rows = self.rows.lock().unwrap();
        if !rows.contains_key(&product.id) {
            return Err(AppError::NotFound(format!(
                "product not found with id: {}",
                product.id
            )));
        }

        let updated = Product {
            updated_at: Utc::now(),
            ..product.clone()
        };
        rows.insert(product.id, updated.clone());
        Ok(updated)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        self.config.check()?;
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.config.check()?;
        Ok(self.rows.lock().unwrap().len() as i64)
    }
}

/// Togglable database probe.
pub struct MockHealthProbe {
    healthy: AtomicBool,
}

impl MockHealthProbe {
    #[must_use]
    pub fn new() -> Self {
        Self {
            healthy: AtomicBool::new(true),
        }
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::Relaxed);
    }
}

impl Default for MockHealthProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HealthProbe for MockHealthProbe {
    async fn ping(&self) -> Result<(), AppError> {
        if self.healthy.load(Ordering::Relaxed) {
            Ok(())
        } else {
            Err(AppError::Database(DatabaseError::Connection(
                "mock database unhealthy".to_string(),
            )))
        }
    }
}

/// Fresh application state over empty in-memory stores.
#[must_use]
pub fn test_state() -> Arc<AppState> {
    Arc::new(AppState::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryProductRepository::new()),
        Arc::new(MockHealthProbe::new()),
    ))
}
