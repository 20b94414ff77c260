//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod fallback;
pub mod ping;
pub mod redirect;
pub mod shorten;
pub mod stats;
pub mod user_links;

pub use fallback::fallback_handler;
pub use ping::ping_handler;
pub use redirect::redirect_handler;
pub use shorten::{shorten_batch_handler, shorten_json_handler, shorten_text_handler};
pub use stats::stats_handler;
pub use user_links::{delete_user_links_handler, user_links_handler};
