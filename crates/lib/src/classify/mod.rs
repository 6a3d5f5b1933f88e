//! # Classifiers
//!
//! Keyword classifiers that run before the matcher: the domain/banned-content filter, the
//! coarse intent label, and the preferred-category guess. All are pure substring scans over
//! the tables in [`crate::lexicon`].

pub mod category;
pub mod domain;
pub mod intent;

pub use category::CategoryClassifier;
pub use domain::{DomainFilter, DomainVerdict};
pub use intent::IntentClassifier;
