use base64ct::{Base64Url, Encoding};
use rand::{rngs::OsRng, RngCore};

/// Raw bytes drawn for a remember token before encoding.
pub const REMEMBER_TOKEN_BYTES: usize = 32;

pub fn bytes(n: usize) -> Vec<u8> {
    let mut buf = vec![0u8; n];
    OsRng.fill_bytes(&mut buf);
    buf
}

/// A random URL-safe string backed by `n` bytes of OS entropy.
pub fn string(n: usize) -> String {
    Base64Url::encode_string(&bytes(n))
}

pub fn remember_token() -> String {
    string(REMEMBER_TOKEN_BYTES)
}
