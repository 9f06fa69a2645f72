pub mod game;
pub mod word;

// Re-export all types
pub use game::*;
pub use word::*;
