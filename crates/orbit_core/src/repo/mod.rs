//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable key-value seam used by core storage.
//! - Keep serialization and SQL details away from services and FFI.
//!
//! # Invariants
//! - Repository writes replace whole values; no torn reads are observable.
//! - Repository APIs distinguish read failures from write failures.

pub mod image_ref_repo;
pub mod kv_repo;
