//! Infrastructure layer for the types registry.
//!
//! Contains storage implementations.

pub mod storage;

pub use storage::InMemoryTypeDefRepository;
