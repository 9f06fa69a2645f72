pub mod prelude;

pub mod attempts;
pub mod games;
pub mod words;
