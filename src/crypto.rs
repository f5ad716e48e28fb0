use rand::rngs::{OsRng, SmallRng};
use rand::{RngCore, SeedableRng};
use uuid::Builder;

/// Default invitation token length in characters.
pub const DEFAULT_TOKEN_LENGTH: usize = 32;

/// Token alphabet: A-Z, a-z and 2-9 without the look-alikes `I`, `O`, `l`, `o`.
pub const TOKEN_ALPHABET: &[u8; 56] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnpqrstuvwxyz23456789";

/// Generates a cryptographically secure random token.
///
/// Each character comes from one OS-random byte reduced modulo the alphabet
/// size, giving about 5.8 bits of entropy per character (~185 bits at the
/// default length). Collisions are not checked against storage.
///
/// # Example
///
/// ```rust
/// use tourney_access::crypto::{generate_token, is_valid_token_format};
///
/// let token = generate_token(32);
/// assert!(is_valid_token_format(&token, 32));
/// ```
pub fn generate_token(length: usize) -> String {
    let mut bytes = vec![0u8; length];
    OsRng.fill_bytes(&mut bytes);
    bytes
        .iter()
        .map(|b| char::from(TOKEN_ALPHABET[usize::from(*b) % TOKEN_ALPHABET.len()]))
        .collect()
}

/// Generates a token with the default length (32 characters).
pub fn generate_token_default() -> String {
    generate_token(DEFAULT_TOKEN_LENGTH)
}

/// Shape check only: correct length and every character from the alphabet.
///
/// A well-formed token may still be unknown, expired or used up.
pub fn is_valid_token_format(token: &str, length: usize) -> bool {
    token.len() == length && token.bytes().all(|b| TOKEN_ALPHABET.contains(&b))
}

/// Generates an opaque record id (a v4 UUID string).
///
/// Uses the OS random source. If that is unavailable the bytes come from a
/// time-seeded non-cryptographic generator instead, which is weaker; ids are
/// identifiers, not secrets.
pub fn generate_id() -> String {
    let mut bytes = [0u8; 16];
    if let Err(err) = OsRng.try_fill_bytes(&mut bytes) {
        log::warn!(
            target: "tourney_access",
            "msg=\"os random source unavailable, using fallback id generator\", error=\"{err}\""
        );
        fallback_rng().fill_bytes(&mut bytes);
    }
    Builder::from_random_bytes(bytes).into_uuid().to_string()
}

fn fallback_rng() -> SmallRng {
    let nanos = chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default();
    SmallRng::seed_from_u64(nanos.unsigned_abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_has_no_ambiguous_characters() {
        for c in [b'0', b'1', b'I', b'O', b'l', b'o'] {
            assert!(!TOKEN_ALPHABET.contains(&c), "{} in alphabet", char::from(c));
        }
    }

    #[test]
    fn test_generate_token_length() {
        assert_eq!(generate_token(32).len(), 32);
        assert_eq!(generate_token(48).len(), 48);
        assert_eq!(generate_token_default().len(), DEFAULT_TOKEN_LENGTH);
    }

    #[test]
    fn test_generate_token_unique() {
        assert_ne!(generate_token(32), generate_token(32));
    }

    #[test]
    fn test_generated_token_uses_alphabet() {
        let token = generate_token(500);
        assert!(token.bytes().all(|b| TOKEN_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_token_format_check() {
        let token = generate_token_default();
        assert!(is_valid_token_format(&token, 32));
        assert!(!is_valid_token_format(&token, 31));
        assert!(!is_valid_token_format("", 32));

        let with_zero = format!("0{}", &token[1..]);
        assert!(!is_valid_token_format(&with_zero, 32));
    }

    #[test]
    fn test_generate_id_is_v4_uuid() {
        let id = generate_id();
        let parsed = uuid::Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_ne!(id, generate_id());
    }

    #[test]
    fn test_fallback_rng_produces_bytes() {
        let mut bytes = [0u8; 16];
        fallback_rng().fill_bytes(&mut bytes);
        let id = Builder::from_random_bytes(bytes).into_uuid();
        assert_eq!(id.get_version_num(), 4);
    }
}
