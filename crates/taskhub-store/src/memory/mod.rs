//! In-memory session store.

pub mod store;

pub use store::MemoryStore;
