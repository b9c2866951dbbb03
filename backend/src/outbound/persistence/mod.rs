//! Persistence adapters for the association collection.

mod memory;

pub use memory::InMemoryAssociationStore;
