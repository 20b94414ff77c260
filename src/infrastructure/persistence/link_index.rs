//! In-process link index shared by the memory and file repositories.

use std::collections::{HashMap, HashSet};

use serde_json::json;

use crate::domain::entities::{Link, NewLink, Stats};
use crate::error::AppError;

/// Links in insertion order plus lookup indexes by code, original URL and owner.
///
/// The index enforces original-URL uniqueness itself, so callers holding it
/// behind a lock get an atomic check-and-insert. When two URLs share a short
/// code the later insert takes over the code entry.
#[derive(Debug, Clone, Default)]
pub struct LinkIndex {
    links: Vec<Link>,
    by_code: HashMap<String, usize>,
    by_original: HashMap<String, usize>,
    by_owner: HashMap<String, Vec<usize>>,
}

impl LinkIndex {
    /// Builds an index from previously persisted links.
    ///
    /// Later duplicates of an original URL are dropped.
    pub fn from_links(links: impl IntoIterator<Item = Link>) -> Self {
        let mut index = Self::default();
        for link in links {
            if !index.by_original.contains_key(&link.original_url) {
                index.push(link);
            }
        }
        index
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn insert(&mut self, new_link: NewLink) -> Result<Link, AppError> {
        self.ensure_absent(&new_link.original_url)?;

        let link = Link::from(new_link);
        self.push(link.clone());
        Ok(link)
    }

    /// Inserts every link or, on the first conflict, none of them.
    pub fn insert_batch(&mut self, new_links: Vec<NewLink>) -> Result<(), AppError> {
        let mut seen = HashSet::with_capacity(new_links.len());
        for new_link in &new_links {
            self.ensure_absent(&new_link.original_url)?;
            if !seen.insert(new_link.original_url.as_str()) {
                return Err(duplicate(&new_link.original_url));
            }
        }

        for new_link in new_links {
            self.push(Link::from(new_link));
        }
        Ok(())
    }

    pub fn find_by_code(&self, code: &str) -> Option<&Link> {
        self.by_code.get(code).map(|&i| &self.links[i])
    }

    pub fn find_by_original_url(&self, original_url: &str) -> Option<&Link> {
        self.by_original.get(original_url).map(|&i| &self.links[i])
    }

    pub fn list_by_owner(&self, owner_id: &str) -> Vec<Link> {
        self.by_owner
            .get(owner_id)
            .map(|positions| positions.iter().map(|&i| self.links[i].clone()).collect())
            .unwrap_or_default()
    }

    /// Flags the owner's links among `codes` as deleted.
    pub fn delete_batch(&mut self, codes: &[String], owner_id: &str) -> u64 {
        let mut deleted = 0;
        for code in codes {
            let Some(&i) = self.by_code.get(code) else {
                continue;
            };
            let link = &mut self.links[i];
            if link.is_owned_by(owner_id) && !link.is_deleted {
                link.is_deleted = true;
                deleted += 1;
            }
        }
        deleted
    }

    pub fn stats(&self) -> Stats {
        let url_count = self.links.iter().filter(|l| !l.code.is_empty()).count();
        let user_count = self
            .by_owner
            .keys()
            .filter(|owner| !owner.is_empty())
            .count();

        Stats {
            url_count: url_count as i64,
            user_count: user_count as i64,
        }
    }

    fn ensure_absent(&self, original_url: &str) -> Result<(), AppError> {
        if self.by_original.contains_key(original_url) {
            return Err(duplicate(original_url));
        }
        Ok(())
    }

    fn push(&mut self, link: Link) {
        let position = self.links.len();
        self.by_code.insert(link.code.clone(), position);
        self.by_original.insert(link.original_url.clone(), position);
        self.by_owner
            .entry(link.owner_id.clone())
            .or_default()
            .push(position);
        self.links.push(link);
    }
}

fn duplicate(original_url: &str) -> AppError {
    AppError::conflict(
        "Original URL already shortened",
        json!({ "original_url": original_url }),
    )
}
