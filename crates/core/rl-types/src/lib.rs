//! Core types for rl-rotate.
//!
//! - [`ArchiveItem`] - One candidate for rotation, produced by a listing collaborator
//! - [`ItemKind`] - Name-based classification applied while listing

mod item;
mod kind;

pub use item::ArchiveItem;
pub use kind::ItemKind;

/// Point in time attached to an item.
///
/// Dates embedded in names carry no zone, so every timestamp is a naive local
/// wall-clock time.
pub type Timestamp = chrono::NaiveDateTime;
