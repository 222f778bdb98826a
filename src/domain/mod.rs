pub mod article;
pub mod category;
pub mod content;
pub mod facets;
pub mod idea;
pub mod language;
pub mod multilingual;
pub mod translation;
pub mod types;
