use base64ct::{Base64Url, Encoding};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Deterministic keyed hash used for remember tokens.
///
/// Equal inputs always produce equal output, so a presented token can be
/// looked up by its hash instead of comparing plaintexts row by row.
#[derive(Clone)]
pub struct KeyedHasher {
    mac: HmacSha256,
}

impl KeyedHasher {
    pub fn new(key: &str) -> Self {
        let mac = HmacSha256::new_from_slice(key.as_bytes())
            .expect("HMAC accepts keys of any length");
        Self { mac }
    }

    /// Hash the input and encode the tag as URL-safe base64.
    pub fn hash(&self, input: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(input.as_bytes());
        Base64Url::encode_string(&mac.finalize().into_bytes())
    }
}
