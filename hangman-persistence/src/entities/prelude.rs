pub use super::attempts::Entity as Attempts;
pub use super::games::Entity as Games;
pub use super::words::Entity as Words;
