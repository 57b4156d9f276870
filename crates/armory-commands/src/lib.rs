//! # Armory Commands
//!
//! Discord command implementations using Poise framework for Armory Bot.
//!
//! This crate provides the `character-lookup` and `character-compare` slash
//! commands, the PvP follow-up menu handler, and the conversion of rendered
//! reply documents into Discord embeds.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod compare;
pub mod framework;
pub mod lookup;
pub mod pvp;
pub mod reply;

pub use compare::*;
pub use framework::*;
pub use lookup::*;
pub use pvp::*;
pub use reply::*;
