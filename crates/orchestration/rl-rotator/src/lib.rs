//! rl-rotator - decides which archive items to rotate.
//!
//! The engine works on abstract [`ArchiveItem`]s and never touches storage:
//!
//! - [`DateExtractor`] resolves a timestamp from an item's name or metadata
//! - [`Criterion`] / [`CriteriaSet`] evaluate per-item rules with AND logic
//! - [`FilterSpec`] keeps one representative per day/month/year bucket
//! - [`Rotator`] / [`list_items`] compose the three into one listing call
//!
//! Everything is built from a [`RotationConfig`]; configuration errors surface
//! at construction, and evaluation itself cannot fail.
//!
//! # Example
//!
//! ```
//! use rl_rotator::{Rotator, RotationConfig};
//! use rl_types::ArchiveItem;
//!
//! let config = RotationConfig::from_toml_str(r#"
//!     [criteria]
//!     year = 2020
//!     except_day = [1]
//! "#).unwrap();
//! let rotator = Rotator::from_config(&config).unwrap();
//!
//! let candidates = ["a_2020-01-01", "a_2020-01-02", "a_2020-02-01"]
//!     .into_iter()
//!     .map(ArchiveItem::new)
//!     .collect();
//! let rotate = rotator.list_items(candidates);
//! assert_eq!(rotate.len(), 1);
//! assert_eq!(rotate[0].name(), "a_2020-01-02");
//! ```
//!
//! [`ArchiveItem`]: rl_types::ArchiveItem

pub mod config;
pub mod criteria;
pub mod extract;
pub mod filter;
pub mod rotator;
pub mod stats;

pub use config::RotationConfig;
pub use criteria::{CriteriaSet, CriteriaSpec, Criterion, DateBound, OneOrMany};
pub use extract::{DateExtractor, DateSource};
pub use filter::{FilterSpec, Granularity};
pub use rotator::{RotationOutcome, Rotator, list_items};
pub use stats::RotationStats;
