//! Local directory collaborators for rl-rotate.
//!
//! [`FsSource`] lists the regular files of one directory as candidates, and
//! [`FsRemover`] deletes matched files from it. Subdirectories are never
//! descended into.

mod remover;
mod source;

pub use remover::FsRemover;
pub use source::FsSource;
