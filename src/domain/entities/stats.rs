//! Aggregate statistics computed by the link store.

/// Service-wide counters.
///
/// Not stored; each backend computes it on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Records with a non-empty short code, deleted ones included.
    pub url_count: i64,
    /// Distinct non-empty owner ids.
    pub user_count: i64,
}
