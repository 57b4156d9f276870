//! # Armory Bot
//!
//! Discord bot for looking up and comparing World of Warcraft characters.
//!
//! This is the main binary crate: it loads configuration, installs logging,
//! builds the Blizzard profile client and runs the Poise framework.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;
pub mod logging;

pub use bot::*;
pub use error::*;
pub use logging::*;
