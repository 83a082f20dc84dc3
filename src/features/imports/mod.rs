//! Bulk import of categories and professionals from CSV/JSON files

pub mod dtos;
pub mod handlers;
pub mod insert;
pub mod parser;
pub mod routes;
pub mod services;
pub mod templates;
pub mod validation;
pub mod workflow;

pub use services::ImportService;
