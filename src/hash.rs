use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Deterministic keyed token hasher.
///
/// The same input and key always produce the same digest, so a stored
/// hash can serve as an equality-lookup index without the plaintext
/// ever being persisted. This is intentionally unlike password hashing,
/// which salts every call. The key is fixed at construction; rotating
/// it invalidates every outstanding remember and reset token at once.
#[derive(Clone)]
pub struct HmacHasher {
    key: Vec<u8>,
}

impl HmacHasher {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.as_bytes().to_vec(),
        }
    }

    pub fn hash(&self, input: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC accepts keys of any length");
        mac.update(input.as_bytes());
        URL_SAFE.encode(mac.finalize().into_bytes())
    }
}
