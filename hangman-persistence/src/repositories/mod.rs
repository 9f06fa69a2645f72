pub mod game_repository;
pub mod word_repository;

pub use game_repository::SqlGameRepository;
pub use word_repository::SqlWordStore;
