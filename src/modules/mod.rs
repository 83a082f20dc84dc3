//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the record store abstraction and its PostgreSQL adapter.

pub mod store;
