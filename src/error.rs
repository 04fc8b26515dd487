use thiserror::Error;

/// Errors surfaced by [`IntervalMap`](crate::IntervalMap) and its cursor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The range bounds do not describe a non-empty half-open range.
    #[error("invalid range [{from}, {to}): `to` must be greater than `from`")]
    InvalidRange {
        /// Requested start
        from: i64,
        /// Requested end
        to: i64,
    },
    /// Reconciling an insert needed more nested steps than the map allows.
    #[error("range reconciliation exceeded the recursion limit of {limit}")]
    RecursionExhausted {
        /// The configured `max_recursions`
        limit: usize,
    },
    /// The map was structurally modified behind a cursor's back.
    #[error("map was structurally modified during iteration")]
    ConcurrentModification,
    /// `Cursor::remove` was called without a preceding `Cursor::next`.
    #[error("cursor has no current entry to remove")]
    NoCurrentEntry,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
