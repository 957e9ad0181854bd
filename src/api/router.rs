//! HTTP routing configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::app::AppState;

use super::health::health;
use super::products::{
    count_products, create_product, delete_product, get_product, list_products,
    products_by_category, products_by_max_price, products_in_stock, update_product,
};
use super::users::{count_users, create_user, delete_user, get_user, list_users, update_user};

/// Builds the application router with request tracing and a request timeout.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ));

    let user_routes = Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/count", get(count_users))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user));

    let product_routes = Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/count", get(count_products))
        .route("/instock", get(products_in_stock))
        .route("/category/{category}", get(products_by_category))
        .route("/price/{max_price}", get(products_by_max_price))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        );

    Router::new()
        .nest("/api/users", user_routes)
        .nest("/api/products", product_routes)
        .route("/actuator/health", get(health))
        .layer(middleware)
        .with_state(app_state)
}
