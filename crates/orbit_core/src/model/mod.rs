//! Domain model for the home feed, contacts, todos and image references.
//!
//! # Responsibility
//! - Define canonical data structures used by core logic and the FFI layer.
//! - Keep validation rules next to the records they guard.
//!
//! # Invariants
//! - Connection/contact IDs are stable and double as image reference keys.
//! - Feed records are read-only inputs; nothing in core mutates them.

pub mod contact;
pub mod feed;
pub mod image_ref;
pub mod todo;
