//! Storage implementations for the types registry.

mod in_memory_repo;

pub use in_memory_repo::InMemoryTypeDefRepository;
