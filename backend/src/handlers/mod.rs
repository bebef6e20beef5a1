//! HTTP request handlers

pub mod chat;
pub mod crops;
pub mod health;
pub mod market;
pub mod pest;
pub mod recommendation;
pub mod reporting;
pub mod weather;

pub use chat::*;
pub use crops::*;
pub use health::*;
pub use market::*;
pub use pest::*;
pub use recommendation::*;
pub use reporting::*;
pub use weather::*;
