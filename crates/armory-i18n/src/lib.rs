//! # Armory I18n
//!
//! Internationalization support using the Fluent localization system for
//! Armory Bot.
//!
//! Every user-facing string (field labels, placeholders and failure replies)
//! is looked up through [`Messages`], backed by catalogs embedded at compile
//! time.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod loader;
pub mod messages;

pub use loader::*;
pub use messages::*;
