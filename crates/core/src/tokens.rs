// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! QR check-in token generation and hashing.
//!
//! Plaintext tokens exist only in the generation response; the store
//! keeps the SHA-256 hash. Validation hashes the presented value and
//! looks the hash up.

use sha2::{Digest, Sha256};
use std::fmt::Write as _;

/// How long a freshly generated token validates, in hours.
pub const QR_TOKEN_TTL_HOURS: i64 = 24;

/// Source of fresh token values.
pub trait TokenGenerator: Send + Sync {
    /// Produces a new plaintext token value.
    fn generate(&self) -> String;
}

/// Generates 128-bit random tokens as 32 lowercase hex characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokenGenerator;

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> String {
        format!("{:016x}{:016x}", rand::random::<u64>(), rand::random::<u64>())
    }
}

/// Always produces the same token value. Test use only.
#[derive(Debug, Clone)]
pub struct FixedTokenGenerator {
    value: String,
}

impl FixedTokenGenerator {
    /// Creates a generator that always returns `value`.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl TokenGenerator for FixedTokenGenerator {
    fn generate(&self) -> String {
        self.value.clone()
    }
}

/// Returns the lowercase hex SHA-256 digest of a token value.
#[must_use]
pub fn token_hash(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    digest.iter().fold(
        String::with_capacity(digest.len() * 2),
        |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        },
    )
}
