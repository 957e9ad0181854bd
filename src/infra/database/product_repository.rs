//! PostgreSQL implementation of the product repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::Row;
use tracing::instrument;

use crate::domain::{AppError, NewProduct, Product, ProductRepository};

use super::postgres::PostgresGateway;

pub struct PostgresProductRepository {
    gateway: Arc<PostgresGateway>,
}

impl PostgresProductRepository {
    #[must_use]
    pub fn new(gateway: Arc<PostgresGateway>) -> Self {
        Self { gateway }
    }

    fn row_to_product(row: &sqlx::postgres::PgRow) -> Product {
        Product {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
            price: row.get("price"),
            quantity: row.get("quantity"),
            category: row.get("category"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    #[instrument(skip(self, product), fields(product_name = %product.name))]
    async fn save(&self, product: &NewProduct) -> Result<Product, AppError> {
        let now = Utc::now();
        let mut tx = self.gateway.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO products (name, description, price, quantity, category, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.quantity)
        .bind(&product.category)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Product {
            id: row.get("id"),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            quantity: product.quantity,
            category: product.category.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, price, quantity, category, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.gateway.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_product))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, price, quantity, category, created_at, updated_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(self.gateway.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_product).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, price, quantity, category, created_at, updated_at
            FROM products
            WHERE category = $1
            ORDER BY id
            "#,
        )
        .bind(category)
        .fetch_all(self.gateway.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_product).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_max_price(&self, max_price: Decimal) -> Result<Vec<Product>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, price, quantity, category, created_at, updated_at
            FROM products
            WHERE price <= $1
            ORDER BY price ASC
            "#,
        )
        .bind(max_price)
        .fetch_all(self.gateway.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_product).collect())
    }

    #[instrument(skip(self))]
    async fn find_in_stock(&self) -> Result<Vec<Product>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, price, quantity, category, created_at, updated_at
            FROM products
            WHERE quantity > 0
            ORDER BY id
            "#,
        )
        .fetch_all(self.gateway.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_product).collect())
    }

    #[instrument(skip(self, product), fields(product_id = product.id))]
    async fn update(&self, product: &Product) -> Result<Product, AppError> {
        let now = Utc::now();
        let mut tx = self.gateway.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $1, description = $2, price = $3, quantity = $4, category = $5,
                updated_at = $6
            WHERE id = $7
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.quantity)
        .bind(&product.category)
        .bind(now)
        .bind(product.id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "product not found with id: {}",
                product.id
            )));
        }

        tx.commit().await?;

        Ok(Product {
            updated_at: now,
            ..product.clone()
        })
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.gateway.begin().await?;

        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM products")
            .fetch_one(self.gateway.pool())
            .await?;

        Ok(row.get("count"))
    }
}
