//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate filtering and image reference storage into use-case APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod avatar_service;
pub mod feed_service;
