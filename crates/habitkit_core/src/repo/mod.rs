//! Persistence layer abstractions and the SQLite-backed store.
//!
//! # Responsibility
//! - Define the durable key-value contract for the two collections.
//! - Isolate SQLite and serialization details from service orchestration.
//!
//! # Invariants
//! - Reads degrade to the empty collection instead of failing.
//! - Writes replace a whole collection under its fixed key or fail loudly.

pub mod store;
