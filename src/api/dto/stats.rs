//! DTOs for service statistics.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Stats;

/// Service-wide counters.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Number of stored short links, deleted ones included.
    pub urls: i64,
    /// Number of distinct users that own links.
    pub users: i64,
}

impl From<Stats> for StatsResponse {
    fn from(stats: Stats) -> Self {
        Self {
            urls: stats.url_count,
            users: stats.user_count,
        }
    }
}
