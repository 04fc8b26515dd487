//! `split_interval_map` is a map from disjoint half-open `i64` ranges to lists of values.
//!
//! Inserting a range that overlaps stored ones never replaces them. Instead the
//! ranges are split at every boundary, so that each point keeps the values of every
//! range ever added over it, in the order they were added. Touching ranges are kept
//! apart; nothing is merged unless an insert starts exactly on an existing range.
//!
//! The map is a red-black tree. As in an arena allocator, nodes live in a vector
//! and refer to their parent and children by index, which keeps the structure free
//! of reference cycles and makes it `Send`. It is not synchronized; shared mutation
//! needs an external lock.
//!
//! Reconciling one insert may cascade through many neighbouring ranges. The depth
//! of that cascade is bounded by [`IntervalMapConfig::max_recursions`]; running past
//! it either fails the insert or stops quietly, see
//! [`IntervalMapConfig::exhausted_is_error`].
//!
//! # Example
//!
//! ```rust
//! use split_interval_map::IntervalMap;
//!
//! let mut map = IntervalMap::new();
//! map.add(10, 20, "A").unwrap();
//! assert!(map.add(15, 25, "B").unwrap());
//!
//! let ranges: Vec<_> = map
//!     .iter()
//!     .map(|e| (e.from(), e.to(), e.values().to_vec()))
//!     .collect();
//! assert_eq!(
//!     ranges,
//!     vec![
//!         (10, 15, vec!["A"]),
//!         (15, 20, vec!["A", "B"]),
//!         (20, 25, vec!["B"]),
//!     ]
//! );
//! ```

mod config;
mod entry;
mod error;
mod index;
mod interval;
mod intervalmap;
mod iter;
mod node;
mod reconcile;

#[cfg(test)]
mod proptests;

pub use config::IntervalMapConfig;
pub use entry::Entry;
pub use error::{Error, Result};
pub use index::{DefaultIx, IndexType};
pub use interval::Interval;
pub use intervalmap::IntervalMap;
pub use iter::{Cursor, IntoIter, Iter, OverlappingRanges};
