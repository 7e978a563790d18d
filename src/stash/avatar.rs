//! Avatar URL derivation from author email addresses.

use sha2::{Digest, Sha256};

const GRAVATAR_BASE: &str = "https://www.gravatar.com/avatar";

/// Maps an email address to a Gravatar image URL.
///
/// The address is trimmed and lowercased before hashing so that the same
/// mailbox always yields the same URL. An empty address yields an empty URL
/// rather than the avatar of the empty string.
#[must_use]
pub fn avatar_link(email: &str) -> String {
    let normalised = email.trim().to_lowercase();
    if normalised.is_empty() {
        return String::new();
    }
    let digest = Sha256::digest(normalised.as_bytes());
    format!("{GRAVATAR_BASE}/{digest:x}.jpg")
}
