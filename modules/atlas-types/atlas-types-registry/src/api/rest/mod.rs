//! REST API layer for the types registry.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod transport;

pub use routes::router;
pub use transport::RouterTransport;
