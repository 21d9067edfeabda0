// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors raised by the store itself, as opposed to the domain logic
/// running inside a transaction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store's lock was poisoned by a panicking writer.
    #[error("Store lock poisoned by a panicked transaction")]
    Poisoned,

    /// A backend constraint was violated (e.g. a uniqueness rule).
    #[error("Store constraint violated: {message}")]
    Constraint {
        /// Description of the violated constraint.
        message: String,
    },

    /// The backend failed (connectivity, I/O).
    #[error("Store backend failure: {message}")]
    Backend {
        /// Description of the failure.
        message: String,
    },
}
