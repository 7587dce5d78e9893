use anyhow::Context;
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use rand::{rngs::OsRng, RngCore};

/// Number of random bytes behind every generated token.
pub const TOKEN_BYTES: usize = 32;

/// Generate a URL-safe token from 32 bytes of OS entropy.
///
/// An entropy-source failure is returned to the caller, never
/// swallowed; the operation in flight must treat it as fatal.
pub fn generate_token() -> anyhow::Result<String> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("read from the OS entropy source")?;
    Ok(URL_SAFE.encode(bytes))
}

/// Decoded byte count of a token, for minimum-length checks.
pub fn decoded_len(token: &str) -> anyhow::Result<usize> {
    let bytes = URL_SAFE
        .decode(token)
        .context("token is not valid URL-safe base64")?;
    Ok(bytes.len())
}
