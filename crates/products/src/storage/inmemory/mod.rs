//! In-memory storage backend.
//!
//! Stores products in a HashMap wrapped in `Arc<RwLock<_>>`. Data is lost
//! when the process exits. Mirrors the store semantics the handlers rely on:
//! conditional create, upserting update, idempotent delete.

mod repository;

pub use repository::InMemoryRepository;
