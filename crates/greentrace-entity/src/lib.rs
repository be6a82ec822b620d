//! # greentrace-entity
//!
//! Domain entity models for GreenTrace. Every struct in this crate is a
//! tracked record or a value object embedded in one. All entities derive
//! `Debug`, `Clone`, `Serialize`, and `Deserialize`, and serialize with the
//! camelCase field names consumed by the reporting surface.

pub mod audit;
pub mod compliance;
pub mod document;
