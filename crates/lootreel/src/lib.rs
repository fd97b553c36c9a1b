//! Tier-weighted case opening with a fixed-duration reel reveal.
//!
//! Items are bucketed into rarity tiers once per load ([`assign`]), each open
//! draws a tier and an item ([`select`]), and [`opener::CaseOpener`] drives
//! the reel ([`reel`]) and the reveal ([`reveal`]) from caller-supplied ticks.

pub mod assign;
pub mod audio;
pub mod config;
pub mod events;
pub mod geometry;
pub mod item;
pub mod macros;
pub mod opener;
pub mod reel;
pub mod render;
pub mod reveal;
pub mod select;
pub mod settings;
pub mod source;
pub mod sys;
pub mod tier;

pub use item::Item;
pub use opener::{CaseOpener, OpenError, Tick};
pub use select::OpenResult;
pub use tier::{TIER_TABLE, Tier};
