//! Collaborator traits for rl-rotate.
//!
//! The rotation engine never touches a filesystem, database or bucket. Backends
//! plug in through two seams:
//!
//! - [`ItemSource`] produces candidate [`ArchiveItem`]s
//! - [`ItemRemover`] removes the items the engine matched
//!
//! [`ArchiveItem`]: rl_types::ArchiveItem

mod remover;
mod source;

pub use remover::{ItemRemover, RemovalReport};
pub use source::{ItemSource, StaticSource};
