//! In-memory adapters for the board ports.

mod store;

pub use store::InMemoryTaskStore;
