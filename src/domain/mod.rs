//! Domain types for document selection, parse results, and the AI exchange.

pub mod ai;
pub mod documents;
pub mod results;

// Re-export commonly used types
pub use ai::*;
pub use documents::*;
pub use results::*;
