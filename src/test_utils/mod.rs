//! Test utilities and mock implementations.
//!
//! This module provides reusable in-memory repositories for use in unit
//! and integration tests.

pub mod mocks;

pub use mocks::{
    InMemoryProductRepository, InMemoryUserRepository, MockConfig, MockHealthProbe, test_state,
};
