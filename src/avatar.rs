use sha2::{Digest, Sha256};

/// Gravatar URL derived from an email address: 200px, PG-rated, with the
/// mystery-person fallback. The address is trimmed and lowercased before
/// hashing so the URL is stable across input spellings.
pub fn avatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());
    format!(
        "https://www.gravatar.com/avatar/{}?s=200&r=pg&d=mm",
        hex::encode(digest)
    )
}
