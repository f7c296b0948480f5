pub mod branch;
pub mod classify;
pub mod executor;
pub mod operations;

// Public API - curated exports only
pub mod api;

// Re-export commonly used items
pub use api::*;
