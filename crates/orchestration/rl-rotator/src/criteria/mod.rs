//! Per-item criteria.
//!
//! A [`Criterion`] is one predicate over an item's name and resolved
//! timestamp. A [`CriteriaSet`] ANDs together every criterion a caller
//! configured, and is built from a [`CriteriaSpec`], the plain configuration
//! mapping (`{ before = "5d", except_day = [1, 15] }`).
//!
//! Date-based criteria fail closed: an item without a resolved timestamp never
//! matches `before`, `after`, `date`, `day`, `hour`, `year` or any of their
//! `except_*` forms.

mod bound;
mod criterion;
mod set;
mod spec;

pub use bound::DateBound;
pub use criterion::Criterion;
pub use set::CriteriaSet;
pub use spec::{CriteriaSpec, OneOrMany};
