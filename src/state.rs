//! Shared application state injected into every handler.

use std::sync::Arc;

use ipnetwork::IpNetwork;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;

/// Link service over whichever repository the server was started with.
pub type DynLinkService = LinkService<dyn LinkRepository>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynLinkService>,
    /// Clients allowed to read internal stats. `None` denies everyone.
    pub trusted_subnet: Option<IpNetwork>,
}

impl AppState {
    pub fn new(link_service: Arc<DynLinkService>, trusted_subnet: Option<IpNetwork>) -> Self {
        Self {
            link_service,
            trusted_subnet,
        }
    }
}
