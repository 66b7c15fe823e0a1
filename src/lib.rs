pub mod core;
pub mod utils;

// Re-export everything from core for ergonomic library use
// Users can write `shipmate::workflow` instead of `shipmate::core::workflow`
pub use crate::core::*;
