//! Multilingual content core of the ideas platform.
//!
//! Ideas carry their text in a default language and per-language overrides
//! in a translation table; categories keep one title column per language.
//! The idea list can be narrowed by author, category and rating.
//!
//! The `data` feature exposes the domain, persistence and form layers; the
//! default `server` feature adds services, read models and configuration.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;
