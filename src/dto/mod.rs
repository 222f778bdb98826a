//! Read models handed to the presentation layer.

pub mod articles;
pub mod categories;
pub mod ideas;
