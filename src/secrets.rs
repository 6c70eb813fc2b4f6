//! Generation of API keys and webhook secrets.
//!
//! Keys are random lowercase base-36 strings with a recognizable prefix. Only
//! the SHA-256 digest is indexed; the full key stays revealable to operators.

use rand::Rng;
use sha2::{Digest, Sha256};

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub const API_KEY_PREFIX: &str = "lh_";
pub const API_KEY_RANDOM_LEN: usize = 26;
pub const WEBHOOK_SECRET_PREFIX: &str = "whsec_";
pub const WEBHOOK_SECRET_RANDOM_LEN: usize = 13;

/// Visible characters of the random part kept in `key_prefix` and masked output.
const VISIBLE_KEY_CHARS: usize = 8;

/// Random lowercase base-36 string of `len` characters.
pub fn random_base36<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

/// `lh_` followed by 26 base-36 characters.
pub fn generate_api_key<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{API_KEY_PREFIX}{}", random_base36(rng, API_KEY_RANDOM_LEN))
}

/// `whsec_` followed by 13 base-36 characters.
pub fn generate_webhook_secret<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{WEBHOOK_SECRET_PREFIX}{}",
        random_base36(rng, WEBHOOK_SECRET_RANDOM_LEN)
    )
}

/// Leading part of a key that is safe to display and search on.
pub fn key_prefix(key: &str) -> String {
    let visible = key
        .find('_')
        .map(|idx| idx + 1)
        .unwrap_or(0)
        + VISIBLE_KEY_CHARS;
    key.chars().take(visible).collect()
}

/// Lowercase hex SHA-256 digest of the key.
pub fn hash_key(key: &str) -> String {
    hex::encode(Sha256::digest(key.as_bytes()))
}

/// Masks everything after the displayable prefix, keeping the length.
pub fn mask_secret(secret: &str) -> String {
    let prefix = key_prefix(secret);
    let hidden = secret.chars().count().saturating_sub(prefix.chars().count());
    format!("{prefix}{}", "•".repeat(hidden))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn is_base36(value: &str) -> bool {
        value
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
    }

    #[test]
    fn api_key_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let key = generate_api_key(&mut rng);

        assert!(key.starts_with("lh_"));
        assert_eq!(key.len(), 3 + 26);
        assert!(is_base36(&key[3..]));
    }

    #[test]
    fn webhook_secret_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let secret = generate_webhook_secret(&mut rng);

        assert!(secret.starts_with("whsec_"));
        assert_eq!(secret.len(), 6 + 13);
        assert!(is_base36(&secret[6..]));
    }

    #[test]
    fn keys_differ_between_draws() {
        let mut rng = StdRng::seed_from_u64(1);
        let first = generate_api_key(&mut rng);
        let second = generate_api_key(&mut rng);
        assert_ne!(first, second);
    }

    #[test]
    fn prefix_and_mask() {
        let key = "lh_abcdefgh0123456789abcdefgh";
        assert_eq!(key_prefix(key), "lh_abcdefgh");

        let masked = mask_secret(key);
        assert!(masked.starts_with("lh_abcdefgh"));
        assert!(!masked.contains("0123456789"));
        assert_eq!(masked.chars().count(), key.chars().count());
    }

    #[test]
    fn short_values_are_not_over_masked() {
        assert_eq!(mask_secret("abc"), "abc");
        assert_eq!(key_prefix(""), "");
    }

    #[test]
    fn hash_is_stable_sha256_hex() {
        let digest = hash_key("lh_test");
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, hash_key("lh_test"));
        assert_ne!(digest, hash_key("lh_other"));
        assert_eq!(
            hash_key(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
