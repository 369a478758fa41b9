pub mod analyze;
pub mod fetch;

// Re-export command functions for convenience
pub use analyze::analyze;
pub use fetch::fetch;
