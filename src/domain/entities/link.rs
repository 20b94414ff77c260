//! Link entity representing a shortened URL mapping.

/// A persisted short link.
///
/// `code` is derived from `original_url`; `is_deleted` only ever moves from
/// `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: String,
    pub code: String,
    pub original_url: String,
    pub owner_id: String,
    pub is_deleted: bool,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: String,
        code: String,
        original_url: String,
        owner_id: String,
        is_deleted: bool,
    ) -> Self {
        Self {
            id,
            code,
            original_url,
            owner_id,
            is_deleted,
        }
    }

    /// Returns true if the link has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// Returns true if `owner_id` owns this link.
    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id == owner_id
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub id: String,
    pub code: String,
    pub original_url: String,
    pub owner_id: String,
}

impl From<NewLink> for Link {
    fn from(new_link: NewLink) -> Self {
        Link::new(
            new_link.id,
            new_link.code,
            new_link.original_url,
            new_link.owner_id,
            false,
        )
    }
}
