//! hashlab — educational HMAC and SHA-512 toolkit
//!
//! A small library for demonstrating how the HMAC construction works,
//! byte by byte. The SHA-512 primitive is implemented from scratch per
//! FIPS 180-4; the HMAC layer runs on top of it and records every
//! intermediate buffer (key normalization, pads, XOR'd key material,
//! inner hash, outer input) so the whole computation can be inspected.
//!
//! # Layers
//!
//! - [`hash`] — the [`Algorithm`](hash::Algorithm) identifier set with
//!   its `(block_size, digest_size)` parameters, and the from-scratch
//!   [`hash::sha512`] primitive.
//! - [`hmac`] — the [`HmacEngine`](hmac::HmacEngine): `generate` returns
//!   the tag plus the full step trace, `verify` recomputes and compares
//!   (hex-case-insensitively).
//! - [`provider`] — the external fallback seam: algorithms without an
//!   in-process compressor can be served by an injected
//!   [`HmacProvider`](provider::HmacProvider) such as the bundled
//!   `openssl` subprocess wrapper.
//! - [`error`] — the failure taxonomy; everything surfaces as a failed
//!   result, never a process fault.
//!
//! # Example
//!
//! ```
//! use hashlab::hash::Algorithm;
//! use hashlab::hmac::HmacEngine;
//!
//! let engine = HmacEngine::new();
//! let out = engine
//!     .generate(b"Hello World", b"secret_key", Algorithm::Sha512)
//!     .unwrap();
//! assert_eq!(out.tag.len(), 128);
//! assert!(engine.verify(b"Hello World", b"secret_key", &out.tag, Algorithm::Sha512));
//! ```

pub mod error;
pub mod hash;
pub mod hmac;
pub mod provider;
