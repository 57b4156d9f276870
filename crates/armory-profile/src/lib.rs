//! # Armory Profile
//!
//! Character lookup pipeline for Armory Bot.
//!
//! This crate fetches World of Warcraft character resources through a
//! [`ProfileGateway`], assembles them into a [`CharacterSnapshot`], compares
//! two snapshots stat by stat, and renders the results into
//! [`ReplyDocument`]s that the command layer turns into Discord embeds.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod comparison;
pub mod error;
pub mod gateway;
pub mod render;
pub mod resources;
pub mod snapshot;

pub use client::*;
pub use comparison::*;
pub use error::*;
pub use gateway::*;
pub use render::*;
pub use resources::*;
pub use snapshot::*;
