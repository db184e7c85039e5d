//! Ledger API Library
//!
//! Income tracking endpoints for a personal finance REST API: domain
//! types, the repository port with its PostgreSQL adapter, and the axum
//! handlers that validate requests before delegating to the repository.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
