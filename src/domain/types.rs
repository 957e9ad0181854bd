use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A registered user of the system.
///
/// `username` and `email` are unique across all live rows; the database
/// enforces this with unique constraints, the service layer pre-checks it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product in the catalogue. Price and quantity are never negative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wire payload for `POST /api/users`.
///
/// Fields are optional on the wire so that a missing or null required field
/// surfaces as a validation error with a field-specific message instead of a
/// deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Wire payload for `PUT /api/users/{id}`.
///
/// Patch contract: `None` (or an omitted field) means "leave unchanged".
/// There is no way to clear a field back to null through this endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// A validated user ready to be inserted. Produced by `UserService::create_user`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Wire payload for `POST /api/products`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i32>,
    pub category: Option<String>,
}

/// Wire payload for `PUT /api/products/{id}`. Same patch contract as
/// [`UpdateUserRequest`]: `None` means "leave unchanged".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i32>,
    pub category: Option<String>,
}

/// A validated product ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub category: Option<String>,
}

/// Body of the `/count` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: i64,
}

/// Uniform error body: `{"error": "<message>"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health status reported by `/actuator/health`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Up,
    Down,
}

/// Response body of `/actuator/health`. `timestamp` is epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthResponse {
    #[must_use]
    pub fn up() -> Self {
        Self {
            status: HealthStatus::Up,
            timestamp: Utc::now().timestamp_millis(),
            error: None,
        }
    }

    #[must_use]
    pub fn down(error: String) -> Self {
        Self {
            status: HealthStatus::Down,
            timestamp: Utc::now().timestamp_millis(),
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_user_serialization_round_trip() {
        let now = Utc::now();
        let user = User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            first_name: Some("Alice".to_string()),
            last_name: None,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(user, back);
    }

    #[test]
    fn test_create_user_request_tolerates_missing_fields() {
        let request: CreateUserRequest = serde_json::from_str("{}").unwrap();
        assert!(request.username.is_none());
        assert!(request.email.is_none());
    }

    #[test]
    fn test_create_product_request_parses_decimal_price() {
        let request: CreateProductRequest =
            serde_json::from_str(r#"{"name":"Laptop","price":"999.99","quantity":10}"#).unwrap();
        assert_eq!(request.price, Some(Decimal::from_str("999.99").unwrap()));
        assert_eq!(request.quantity, Some(10));
    }

    #[test]
    fn test_health_status_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&HealthStatus::Up).unwrap(), "\"UP\"");
        assert_eq!(
            serde_json::to_string(&HealthStatus::Down).unwrap(),
            "\"DOWN\""
        );
    }

    #[test]
    fn test_health_response_up_has_no_error_field() {
        let response = HealthResponse::up();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "UP");
        assert!(json.get("error").is_none());
        assert!(json["timestamp"].as_i64().unwrap() > 0);
    }

    #[test]
    fn test_health_response_down_carries_error() {
        let response = HealthResponse::down("pool exhausted".to_string());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "DOWN");
        assert_eq!(json["error"], "pool exhausted");
    }
}
