//! # greentrace-core
//!
//! Core crate for GreenTrace. Contains configuration schemas, typed
//! identifiers, pagination/sorting types, the clock abstraction, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other GreenTrace crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::{AppResult, NotFoundExt};
