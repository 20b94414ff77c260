//! Short code derivation and opaque identifier generation.
//!
//! Short codes are content-addressed: the same original URL always produces the
//! same code, so the code itself never needs to be stored to be recomputed.

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the SHA-256 digest.
pub const SHORT_CODE_LENGTH: usize = 10;

/// The OS entropy source could not produce random bytes.
#[derive(Debug, thiserror::Error)]
#[error("entropy source unavailable: {0}")]
pub struct GenerationError(#[source] getrandom::Error);

/// Derives the short code for an original URL.
///
/// Hashes the UTF-8 bytes with SHA-256, hex-encodes the digest and keeps the
/// first [`SHORT_CODE_LENGTH`] characters.
///
/// # Examples
///
/// ```
/// use urlshrt::utils::code_generator::derive_short_code;
///
/// assert_eq!(derive_short_code("http://a.example"), "aee7dad94e");
/// ```
pub fn derive_short_code(original_url: &str) -> String {
    let digest = Sha256::digest(original_url.as_bytes());
    let mut code = hex::encode(digest);
    code.truncate(SHORT_CODE_LENGTH);
    code
}

/// Generates a random UUID v4 in hyphenated form.
///
/// # Errors
///
/// Returns [`GenerationError`] if the system random number generator fails.
pub fn new_opaque_id() -> Result<String, GenerationError> {
    let mut bytes = [0u8; 16];
    getrandom::fill(&mut bytes).map_err(GenerationError)?;

    Ok(uuid::Builder::from_random_bytes(bytes)
        .into_uuid()
        .hyphenated()
        .to_string())
}
