//! Public facade crate for `linkmend`.
//!
//! This crate intentionally contains no site-specific logic or IO.
//! It re-exports the backend-agnostic types/traits from `linkmend-core`.

pub use linkmend_core::*;

