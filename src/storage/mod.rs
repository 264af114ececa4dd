//! Storage implementations for link records and referenced entities

pub mod in_memory;

pub use in_memory::{InMemoryLinkStore, InMemoryReferenceProvider, ReferencedEntity};
