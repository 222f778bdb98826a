//! Service layer: operations over the repository traits, returning DTOs.

pub mod articles;
pub mod categories;
pub mod errors;
pub mod ideas;
pub mod reactions;
pub mod translations;

pub use errors::{ServiceError, ServiceResult};
