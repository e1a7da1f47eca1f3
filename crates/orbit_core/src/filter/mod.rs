//! Home feed filtering.
//!
//! # Responsibility
//! - Derive per-category views of feed collections without I/O.

pub mod engine;
