//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Generate a random 32-byte secret
pub fn random_secret() -> [u8; 32] {
    let mut secret = [0u8; 32];
    OsRng.fill_bytes(&mut secret);
    secret
}

/// Encode bytes as URL-safe base64 (no padding)
pub fn to_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn from_base64url(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(s)
}

/// Compute HMAC-SHA256
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// Sign a payload, producing `<payload>.<base64url(hmac)>`
///
/// The payload must not contain `.`; callers pass UUIDs or base64url text.
pub fn sign(key: &[u8], payload: &str) -> String {
    let signature = hmac_sha256(key, payload.as_bytes());
    format!("{}.{}", payload, to_base64url(&signature))
}

/// Verify a token produced by [`sign`] and return its payload
///
/// Comparison is constant time (delegated to `Mac::verify_slice`).
pub fn verify<'a>(key: &[u8], token: &'a str) -> Option<&'a str> {
    let (payload, signature_b64) = token.split_once('.')?;
    let signature = from_base64url(signature_b64).ok()?;

    let mut mac = HmacSha256::new_from_slice(key).ok()?;
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature).ok()?;

    Some(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_secret_differs() {
        assert_ne!(random_secret(), random_secret());
    }

    #[test]
    fn test_hmac_known_value() {
        // RFC 4231 test case 2
        let mac = hmac_sha256(b"Jefe", b"what do ya want for nothing?");
        let expected =
            hex::decode("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
                .unwrap();
        assert_eq!(mac.to_vec(), expected);
    }

    #[test]
    fn test_sign_and_verify() {
        let key = [7u8; 32];
        let token = sign(&key, "payload123");
        assert!(token.starts_with("payload123."));
        assert_eq!(verify(&key, &token), Some("payload123"));
    }

    #[test]
    fn test_verify_rejects_tampering() {
        let key = [7u8; 32];
        let token = sign(&key, "payload123");

        let tampered = token.replacen("payload123", "payload124", 1);
        assert_eq!(verify(&key, &tampered), None);

        assert_eq!(verify(&[8u8; 32], &token), None);
        assert_eq!(verify(&key, "no-dot-here"), None);
        assert_eq!(verify(&key, "payload.!!notbase64!!"), None);
    }
}
