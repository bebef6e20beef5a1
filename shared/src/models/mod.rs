//! Domain models for the Smart Crop Advisor

mod condition;
mod crop;
mod recommendation;

pub use condition::*;
pub use crop::*;
pub use recommendation::*;
