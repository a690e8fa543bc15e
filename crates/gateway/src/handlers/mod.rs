//! HTTP request handlers.

pub mod health_handler;
pub mod purchase_handler;
pub mod user_handler;

pub use health_handler::health_routes;
pub use purchase_handler::purchase_routes;
pub use user_handler::user_routes;
