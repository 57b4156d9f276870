//! # Armory Common
//!
//! Shared types, utilities, and common functionality for Armory Bot.
//!
//! This crate provides the character identity types, realm slug
//! normalization, and the error type used across all other crates in the
//! Armory Bot workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use types::*;
pub use utils::*;
