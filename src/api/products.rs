//! HTTP handlers for `/api/products`.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use rust_decimal::Decimal;

use crate::app::AppState;
use crate::domain::{
    AppError, CountResponse, CreateProductRequest, Product, UpdateProductRequest,
};

use super::error::write_error;

pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = state.product_service.get_all_products().await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, AppError> {
    state
        .product_service
        .get_product(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product not found with id: {id}")))
}

pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = state.product_service.create_product(&payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<Product>, AppError> {
    state
        .product_service
        .update_product(id, &payload)
        .await
        .map(Json)
        .map_err(write_error)
}

pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if state.product_service.delete_product(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("product not found with id: {id}")))
    }
}

pub async fn products_by_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = state
        .product_service
        .get_products_by_category(&category)
        .await?;
    Ok(Json(products))
}

pub async fn products_by_max_price(
    State(state): State<Arc<AppState>>,
    Path(max_price): Path<Decimal>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = state
        .product_service
        .get_products_by_max_price(max_price)
        .await?;
    Ok(Json(products))
}

pub async fn products_in_stock(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = state.product_service.get_products_in_stock().await?;
    Ok(Json(products))
}

pub async fn count_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CountResponse>, AppError> {
    let count = state.product_service.count_products().await?;
    Ok(Json(CountResponse { count }))
}
