//! Hash primitives and their published parameters
//!
//! The HMAC construction only needs two facts about a hash function: its
//! block size and its digest size. [`Algorithm`] is the closed set of
//! identifiers the toolkit understands together with those parameters.
//! String identifiers are parsed into the enum exactly once at the
//! boundary and never re-compared downstream.
//!
//! Only SHA-512 carries an in-process compressor (the [`sha512`]
//! submodule, implemented from scratch). The remaining algorithms are
//! parameter-only: HMACs over them are reachable solely through an
//! external provider.

pub mod sha512;

use serde::Serialize;

/// A hash algorithm identifier with its published parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl Algorithm {
    /// All known algorithms, in the order the CLI lists them.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Md5,
        Algorithm::Sha1,
        Algorithm::Sha224,
        Algorithm::Sha256,
        Algorithm::Sha384,
        Algorithm::Sha512,
    ];

    /// Lowercase identifier, matching the openssl digest names.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha224 => "sha224",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha384 => "sha384",
            Algorithm::Sha512 => "sha512",
        }
    }

    /// Input block size in bytes, as consumed by the compression function.
    pub fn block_size(&self) -> usize {
        match self {
            Algorithm::Md5 | Algorithm::Sha1 => 64,
            Algorithm::Sha224 | Algorithm::Sha256 => 64,
            Algorithm::Sha384 | Algorithm::Sha512 => 128,
        }
    }

    /// Digest size in bytes.
    pub fn digest_size(&self) -> usize {
        match self {
            Algorithm::Md5 => 16,
            Algorithm::Sha1 => 20,
            Algorithm::Sha224 => 28,
            Algorithm::Sha256 => 32,
            Algorithm::Sha384 => 48,
            Algorithm::Sha512 => 64,
        }
    }

    /// Parses a case-insensitive identifier. Returns `None` for anything
    /// outside the known set.
    pub fn parse(name: &str) -> Option<Algorithm> {
        match name.to_ascii_lowercase().as_str() {
            "md5" => Some(Algorithm::Md5),
            "sha1" => Some(Algorithm::Sha1),
            "sha224" => Some(Algorithm::Sha224),
            "sha256" => Some(Algorithm::Sha256),
            "sha384" => Some(Algorithm::Sha384),
            "sha512" => Some(Algorithm::Sha512),
            _ => None,
        }
    }

    /// Parses an identifier, falling back to SHA-256 for anything
    /// unrecognized. The fallback matches the original tool's documented
    /// default and is only intended for the CLI boundary; library code
    /// should prefer [`Algorithm::parse`].
    pub fn parse_or_default(name: &str) -> Algorithm {
        Algorithm::parse(name).unwrap_or(Algorithm::Sha256)
    }

    /// The in-process digest function, if one exists.
    ///
    /// Only SHA-512 is implemented in-process; every other identifier
    /// returns `None` and must be satisfied by an external provider.
    /// Callers that obtain `Some` hold proof the algorithm can be
    /// computed natively, so downstream code never has to re-check.
    pub fn native_digest(&self) -> Option<fn(&[u8]) -> Vec<u8>> {
        match self {
            Algorithm::Sha512 => Some(|data| sha512::digest(data).to_vec()),
            _ => None,
        }
    }

    /// One-shot digest using the in-process primitive, if one exists.
    pub fn digest(&self, data: &[u8]) -> Option<Vec<u8>> {
        self.native_digest().map(|digest| digest(data))
    }

    /// Whether an in-process compressor exists for this algorithm.
    pub fn has_native_impl(&self) -> bool {
        self.native_digest().is_some()
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
