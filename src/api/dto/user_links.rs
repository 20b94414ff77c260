//! DTOs for per-user link listing.

use serde::{Deserialize, Serialize};

use crate::application::services::UserLink;

#[derive(Debug, Serialize, Deserialize)]
pub struct UserLinkResponse {
    pub short_url: String,
    pub original_url: String,
}

impl From<UserLink> for UserLinkResponse {
    fn from(link: UserLink) -> Self {
        Self {
            short_url: link.short_url,
            original_url: link.original_url,
        }
    }
}
