//! Use-case services combining session state with persistence writes.
//!
//! # Responsibility
//! - Provide the mutation entry points the presentation layer calls.
//! - Keep the in-session collections consistent with durable state.
//!
//! # Invariants
//! - Validation failures are raised before any state mutation.
//! - Session state only advances after a successful save (commit-after-save).

pub mod color;
pub mod event_service;
pub mod habit_service;
