//! Shared types, crop catalog and scoring engine for the Smart Crop Advisor
//!
//! This crate contains everything that is shared between the backend, the
//! browser (via WASM) and tests. It performs no I/O.

pub mod catalog;
pub mod models;
pub mod scoring;
pub mod types;
pub mod validation;

pub use catalog::*;
pub use models::*;
pub use scoring::*;
pub use types::*;
pub use validation::*;
