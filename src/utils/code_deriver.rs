//! Deterministic short code derivation.
//!
//! A short code is the leading `BASE_LENGTH + extension` characters of the
//! URL-safe base64 encoding of the input's SHA-256 digest.

use base64::Engine as _;
use sha2::{Digest, Sha256};

/// Length of a short code derived with no extension.
pub const BASE_LENGTH: usize = 8;

/// Length of an unpadded base64 encoding of a 256-bit digest.
pub const MAX_CODE_LENGTH: usize = 43;

/// Random bytes behind each retry suffix.
const SUFFIX_BYTES: usize = 16;

/// Derives a short code from `input`, `BASE_LENGTH + extension` characters long.
///
/// Pure and deterministic. When the requested length exceeds
/// [`MAX_CODE_LENGTH`] the whole encoding is returned.
///
/// # Examples
///
/// ```
/// use url_shortcode::utils::code_deriver::{derive, BASE_LENGTH};
///
/// let code = derive("https://www.example.com/abc", 0);
/// assert_eq!(code.len(), BASE_LENGTH);
/// assert_eq!(code, derive("https://www.example.com/abc", 0));
/// ```
pub fn derive(input: &str, extension: usize) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut code = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest);

    // base64 output is ASCII, so any length is a char boundary.
    code.truncate(BASE_LENGTH.saturating_add(extension));
    code
}

/// Generates a fresh unpredictable token used to perturb the input on retry.
///
/// # Errors
///
/// Returns the OS entropy error if the system RNG is unavailable.
pub fn random_suffix() -> Result<String, getrandom::Error> {
    let mut buffer = [0u8; SUFFIX_BYTES];
    getrandom::fill(&mut buffer)?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}
