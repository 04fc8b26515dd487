#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Construction parameters of an [`IntervalMap`](crate::IntervalMap).
///
/// # Example
/// ```rust
/// use split_interval_map::{IntervalMap, IntervalMapConfig};
///
/// let config = IntervalMapConfig::new()
///     .with_max_recursions(64)
///     .with_exhausted_is_error(false);
/// let map = IntervalMap::<&str>::with_config(config);
/// assert_eq!(map.config().max_recursions, 64);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct IntervalMapConfig {
    /// Bound on nested reconciliation steps for a single insert
    pub max_recursions: usize,
    /// Whether running past `max_recursions` fails the insert or stops it quietly
    pub exhausted_is_error: bool,
}

impl IntervalMapConfig {
    /// Unbounded recursion, exhaustion reported as an error.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_recursions: usize::MAX,
            exhausted_is_error: true,
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_max_recursions(mut self, max_recursions: usize) -> Self {
        self.max_recursions = max_recursions;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_exhausted_is_error(mut self, exhausted_is_error: bool) -> Self {
        self.exhausted_is_error = exhausted_is_error;
        self
    }
}

impl Default for IntervalMapConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
