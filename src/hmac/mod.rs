//! HMAC construction with step-by-step introspection
//!
//! Implements the keyed-hash construction of RFC 2104 / FIPS 198-1
//! generically over any algorithm with known block and digest sizes,
//! and captures every intermediate buffer along the way so the whole
//! computation can be inspected or visualized.
//!
//! The trace is pure observability: it is assembled from the same
//! buffers the tag is computed from and never feeds back into the
//! computation.
//!
//! Only SHA-512 runs in-process. For the other identifiers the engine
//! delegates the entire computation to an injected [`HmacProvider`],
//! in which case the trace carries placeholders for the buffers the
//! provider does not expose.

use serde::Serialize;
use subtle::ConstantTimeEq;

use crate::error::HmacError;
use crate::hash::Algorithm;
use crate::provider::HmacProvider;

/// Inner pad byte (FIPS 198-1).
const IPAD: u8 = 0x36;

/// Outer pad byte (FIPS 198-1).
const OPAD: u8 = 0x5c;

/// Placeholder for trace fields an external provider cannot expose.
const EXTERNAL_PLACEHOLDER: &str = "external provider - details not available";

/// Every intermediate buffer of one HMAC computation, hex-encoded.
///
/// Serialized with camelCase keys to form the `steps` object of the
/// CLI's JSON output.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HmacSteps {
    /// Hex of the key exactly as supplied by the caller.
    pub original_key: String,
    /// Hex of the key after hashing (if oversized) and zero-padding to
    /// the block size.
    pub processed_key: String,
    /// Human-readable description of which key-processing branch ran.
    pub key_analysis: String,
    /// Hex of `block_size` repetitions of `0x36`.
    pub inner_pad: String,
    /// Hex of `block_size` repetitions of `0x5c`.
    pub outer_pad: String,
    /// Hex of `processed_key XOR inner_pad`.
    pub inner_key_material: String,
    /// Hex of `processed_key XOR outer_pad`.
    pub outer_key_material: String,
    /// Hex of the message.
    pub message_hex: String,
    /// Hex of `H(inner_key_material || message)`.
    pub inner_hash: String,
    /// Hex of `outer_key_material || inner_hash`.
    pub outer_input: String,
    /// Hex of the final tag; equal to the `tag` field of [`HmacOutput`].
    pub final_hmac: String,
    /// Block size of the selected algorithm, in bytes.
    pub block_size: usize,
    /// Lowercase name of the selected algorithm.
    pub algorithm: String,
}

/// A computed tag together with its full intermediate trace.
#[derive(Clone, Debug)]
pub struct HmacOutput {
    /// The tag as lowercase hex, two characters per byte.
    pub tag: String,
    pub steps: HmacSteps,
}

/// Stateless HMAC engine.
///
/// Every call is an independent single-pass pipeline over immutable
/// inputs; the engine itself only holds the optional external provider.
pub struct HmacEngine {
    provider: Option<Box<dyn HmacProvider>>,
}

impl HmacEngine {
    /// Engine with no external fallback: only in-process algorithms
    /// (SHA-512) can be served.
    pub fn new() -> Self {
        Self { provider: None }
    }

    /// Engine that delegates non-native algorithms to `provider`.
    pub fn with_provider(provider: Box<dyn HmacProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Computes the HMAC of `message` under `key`.
    ///
    /// Fails only when the algorithm cannot be resolved: no in-process
    /// compressor and either no provider or a provider error.
    pub fn generate(
        &self,
        message: &[u8],
        key: &[u8],
        algorithm: Algorithm,
    ) -> Result<HmacOutput, HmacError> {
        if let Some(digest) = algorithm.native_digest() {
            return Ok(native_hmac(message, key, algorithm, digest));
        }

        let Some(provider) = &self.provider else {
            return Err(HmacError::Resolution { algorithm });
        };

        log::debug!("no native {} primitive, trying external provider", algorithm);
        let tag = provider
            .hmac(message, key, algorithm)
            .map_err(|source| HmacError::Provider { algorithm, source })?;
        Ok(external_output(tag, message, key, algorithm))
    }

    /// Recomputes the tag and compares it against `expected_tag`.
    ///
    /// The comparison is hex-case-insensitive: an expected tag in any
    /// mixed case is accepted as long as the digits match. This mirrors
    /// the original tool and is a compatibility decision; hex digests
    /// are case-conventionally ambiguous.
    ///
    /// Never errors: any generation failure degrades to `false`, which
    /// is indistinguishable from a tag mismatch at this interface. Call
    /// [`HmacEngine::generate`] directly to tell the two apart.
    pub fn verify(
        &self,
        message: &[u8],
        key: &[u8],
        expected_tag: &str,
        algorithm: Algorithm,
    ) -> bool {
        let computed = match self.generate(message, key, algorithm) {
            Ok(output) => output.tag,
            Err(err) => {
                log::debug!("verify degraded to false: {}", err);
                return false;
            }
        };

        let computed = computed.to_ascii_lowercase();
        let expected = expected_tag.to_ascii_lowercase();
        if computed.len() != expected.len() {
            return false;
        }
        computed.as_bytes().ct_eq(expected.as_bytes()).into()
    }
}

impl Default for HmacEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HmacEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacEngine")
            .field("has_provider", &self.provider.is_some())
            .finish()
    }
}

/// An in-process one-shot digest function, as handed out by
/// [`Algorithm::native_digest`].
type DigestFn = fn(&[u8]) -> Vec<u8>;

/// Normalizes `key` to exactly `block_size` bytes.
///
/// Oversized keys are replaced by their digest first; the (possibly
/// hashed) key is then right-padded with zeros. Keys are never
/// truncated. Returns the padded key and the analysis string recorded
/// in the trace.
fn process_key(key: &[u8], block_size: usize, digest: DigestFn) -> (Vec<u8>, String) {
    let (mut processed, analysis) = if key.len() > block_size {
        let hashed = digest(key);
        let analysis = format!(
            "Key length ({} bytes) exceeds block size ({} bytes). Key hashed to {} bytes.",
            key.len(),
            block_size,
            hashed.len()
        );
        (hashed, analysis)
    } else {
        let analysis = format!(
            "Key length ({} bytes) is within block size ({} bytes). Using key directly.",
            key.len(),
            block_size
        );
        (key.to_vec(), analysis)
    };

    processed.resize(block_size, 0x00);
    (processed, analysis)
}

/// XORs every key byte with the repeated pad byte.
fn xor_with_pad(key: &[u8], pad: u8) -> Vec<u8> {
    key.iter().map(|b| b ^ pad).collect()
}

/// Full in-process computation with a complete trace. `digest` is the
/// native primitive of `algorithm`, resolved by the caller.
fn native_hmac(message: &[u8], key: &[u8], algorithm: Algorithm, digest: DigestFn) -> HmacOutput {
    let block_size = algorithm.block_size();
    let (processed_key, key_analysis) = process_key(key, block_size, digest);

    let inner_key_material = xor_with_pad(&processed_key, IPAD);
    let outer_key_material = xor_with_pad(&processed_key, OPAD);

    let mut inner_input = inner_key_material.clone();
    inner_input.extend_from_slice(message);
    let inner_hash = digest(&inner_input);

    let mut outer_input = outer_key_material.clone();
    outer_input.extend_from_slice(&inner_hash);
    let tag_bytes = digest(&outer_input);
    let tag = hex::encode(&tag_bytes);

    let steps = HmacSteps {
        original_key: hex::encode(key),
        processed_key: hex::encode(&processed_key),
        key_analysis,
        inner_pad: hex::encode(vec![IPAD; block_size]),
        outer_pad: hex::encode(vec![OPAD; block_size]),
        inner_key_material: hex::encode(&inner_key_material),
        outer_key_material: hex::encode(&outer_key_material),
        message_hex: hex::encode(message),
        inner_hash: hex::encode(&inner_hash),
        outer_input: hex::encode(&outer_input),
        final_hmac: tag.clone(),
        block_size,
        algorithm: algorithm.name().to_string(),
    };

    HmacOutput { tag, steps }
}

/// Trace for a tag computed by an external provider. The provider only
/// returns the final tag, so the internal buffers are placeholders.
fn external_output(tag: String, message: &[u8], key: &[u8], algorithm: Algorithm) -> HmacOutput {
    let placeholder = || EXTERNAL_PLACEHOLDER.to_string();
    let steps = HmacSteps {
        original_key: hex::encode(key),
        processed_key: placeholder(),
        key_analysis: format!("Using external provider (fallback) for {}.", algorithm),
        inner_pad: placeholder(),
        outer_pad: placeholder(),
        inner_key_material: placeholder(),
        outer_key_material: placeholder(),
        message_hex: hex::encode(message),
        inner_hash: placeholder(),
        outer_input: placeholder(),
        final_hmac: tag.clone(),
        block_size: algorithm.block_size(),
        algorithm: algorithm.name().to_string(),
    };
    HmacOutput { tag, steps }
}
