//! Flutter bridge surface for Orbit core.

pub mod api;
