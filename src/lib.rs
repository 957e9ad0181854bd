//! A small CRUD REST service for users and products backed by PostgreSQL.
//!
//! # Architecture Overview
//!
//! The crate is organized into four layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                   API Layer                  │
//! │   axum handlers, routing, error -> status    │
//! ├─────────────────────────────────────────────┤
//! │               Application Layer              │
//! │   services: validation, uniqueness, patches  │
//! ├─────────────────────────────────────────────┤
//! │                 Domain Layer                 │
//! │    entities, repository traits, errors       │
//! ├─────────────────────────────────────────────┤
//! │             Infrastructure Layer             │
//! │   Postgres gateway + repository adapters     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Repositories are abstracted behind traits and injected through
//! constructors, so services and handlers are tested against in-memory
//! implementations without a database. Schema migrations are embedded and
//! applied once at startup by the persistence gateway.

pub mod api;
pub mod app;
pub mod domain;
pub mod infra;

// Mock repositories, available to integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
