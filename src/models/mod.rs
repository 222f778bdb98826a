pub mod article;
pub mod category;
#[cfg(feature = "server")]
pub mod config;
pub mod idea;
pub mod reaction;
pub mod translation;
