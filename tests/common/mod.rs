//! Common test helpers for hashlab tests
//!
//! Fake providers so engine behavior can be exercised without spawning
//! processes, plus small reference/tag helpers shared across test files.

use hashlab::error::ProviderError;
use hashlab::hash::Algorithm;
use hashlab::provider::HmacProvider;

/// Provider that always returns the same tag.
pub struct FixedProvider(pub String);

impl HmacProvider for FixedProvider {
    fn hmac(&self, _: &[u8], _: &[u8], _: Algorithm) -> Result<String, ProviderError> {
        Ok(self.0.clone())
    }
}

/// Provider that always fails with an empty-output error.
pub struct FailingProvider;

impl HmacProvider for FailingProvider {
    fn hmac(&self, _: &[u8], _: &[u8], _: Algorithm) -> Result<String, ProviderError> {
        Err(ProviderError::EmptyOutput("simulated failure".into()))
    }
}

/// Reference HMAC-SHA-512 via the RustCrypto stack.
pub fn reference_hmac_sha512(message: &[u8], key: &[u8]) -> String {
    use hmac::{Hmac, Mac};
    use sha2::Sha512;

    let mut mac = Hmac::<Sha512>::new_from_slice(key).expect("hmac accepts keys of any length");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// All tags that differ from `tag` in exactly one bit.
pub fn single_bit_mutations(tag: &str) -> Vec<String> {
    let bytes = hex::decode(tag).expect("tag is valid hex");
    let mut out = Vec::with_capacity(bytes.len() * 8);
    for i in 0..bytes.len() {
        for bit in 0..8 {
            let mut mutated = bytes.clone();
            mutated[i] ^= 1 << bit;
            out.push(hex::encode(&mutated));
        }
    }
    out
}
