//! Flutter-facing FFI crate for HabitKit.
//!
//! # Responsibility
//! - Host the FRB-exported use-case API surface.
//! - Keep core business logic out; this crate only adapts types and errors.

pub mod api;
