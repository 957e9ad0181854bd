//! Business validation and orchestration for product operations.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use crate::domain::{
    AppError, CreateProductRequest, NewProduct, Product, ProductRepository, UpdateProductRequest,
};

/// Validates input and enforces the non-negative price/quantity invariant
/// before delegating to the repository.
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    #[must_use]
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// Creates a new product.
    ///
    /// # Errors
    ///
    /// `Validation` when the name is missing or blank, or when price or
    /// quantity is missing or negative.
    #[instrument(skip(self, request))]
    pub async fn create_product(&self, request: &CreateProductRequest) -> Result<Product, AppError> {
        let name = request
            .name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::Validation("product name is required".to_string()))?
            .to_string();
        let price = request
            .price
            .filter(|p| *p >= Decimal::ZERO)
            .ok_or_else(|| AppError::Validation("price must be zero or positive".to_string()))?;
        let quantity = request
            .quantity
            .filter(|q| *q >= 0)
            .ok_or_else(|| AppError::Validation("quantity must be zero or positive".to_string()))?;

        let new_product = NewProduct {
            name,
            description: request.description.clone(),
            price,
            quantity,
            category: request.category.clone(),
        };

        let product = self.repository.save(&new_product).await?;
        info!(product_id = product.id, "Product created");
        Ok(product)
    }

    pub async fn get_product(&self, id: i64) -> Result<Option<Product>, AppError> {
        self.repository.find_by_id(id).await
    }

    pub async fn get_all_products(&self) -> Result<Vec<Product>, AppError> {
        self.repository.find_all().await
    }

    pub async fn get_products_by_category(&self, category: &str) -> Result<Vec<Product>, AppError> {
        self.repository.find_by_category(category).await
    }

    /// Products priced at or below `max_price`, cheapest first.
    pub async fn get_products_by_max_price(
        &self,
        max_price: Decimal,
    ) -> Result<Vec<Product>, AppError> {
        self.repository.find_by_max_price(max_price).await
    }

    pub async fn get_products_in_stock(&self) -> Result<Vec<Product>, AppError> {
        self.repository.find_in_stock().await
    }

    /// Applies a partial update to a stored product.
    ///
    /// Only fields present in the patch change; a blank name is skipped.
    /// Price and quantity are re-validated when present.
    ///
    /// # Errors
    ///
    /// `NotFound` when the id does not exist, `Validation` when a patched
    /// price or quantity is negative.
    #[instrument(skip(self, patch))]
    pub async fn update_product(
        &self,
        id: i64,
        patch: &UpdateProductRequest,
    ) -> Result<Product, AppError> {
        let mut product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("product not found with id: {id}")))?;

        if let Some(name) = patch.name.as_deref().filter(|s| !s.trim().is_empty()) {
            product.name = name.to_string();
        }
        if let Some(description) = &patch.description {
            product.description = Some(description.clone());
        }
        if let Some(price) = patch.price {
            if price < Decimal::ZERO {
                warn!(product_id = id, %price, "Rejected negative price in patch");
                return Err(AppError::Validation(
                    "price must be zero or positive".to_string(),
                ));
            }
            product.price = price;
        }
        if let Some(quantity) = patch.quantity {
            if quantity < 0 {
                warn!(product_id = id, quantity, "Rejected negative quantity in patch");
                return Err(AppError::Validation(
                    "quantity must be zero or positive".to_string(),
                ));
            }
            product.quantity = quantity;
        }
        if let Some(category) = &patch.category {
            product.category = Some(category.clone());
        }

        let updated = self.repository.update(&product).await?;
        info!(product_id = updated.id, "Product updated");
        Ok(updated)
    }

    /// Deletes a product by id. Returns `false` when the id does not exist.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> Result<bool, AppError> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        self.repository.delete_by_id(id).await?;
        info!(product_id = id, "Product deleted");
        Ok(true)
    }

    pub async fn count_products(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}
