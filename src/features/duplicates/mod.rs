pub mod detector;
pub mod dtos;
pub mod handlers;
pub mod resolver;
pub mod routes;
pub mod services;

pub use services::DuplicateService;
