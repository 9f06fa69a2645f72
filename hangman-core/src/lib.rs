pub mod engine;
pub mod errors;
pub mod repository;
pub mod word_store;

// Re-export main components
pub use engine::*;
pub use errors::*;
pub use repository::*;
pub use word_store::*;
