// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Transactional record store abstraction for the Rota shift engine.
//!
//! The engine never talks to a database directly; it runs closures against
//! a [`Store`], which guarantees that each closure executes atomically and
//! serialized with respect to every other closure. Multi-record mutations
//! (conflict-check-then-assign, swap approval) rely on this: either the
//! whole closure commits or none of it does.
//!
//! Store calls may block. Backends over real connections are expected to
//! enforce their own deadlines; the in-memory reference backend serializes
//! through a process-local lock and does not take one.

mod clock;
mod error;
mod memory;
mod tables;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use tables::Tables;

/// A transactional store over the scheduling entity collections.
pub trait Store {
    /// Runs a read-only closure against a consistent view of the tables.
    ///
    /// # Errors
    ///
    /// Returns whatever the closure returns, or a converted
    /// [`StoreError`] if the store itself fails.
    fn read<T, E>(&self, f: impl FnOnce(&Tables) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>;

    /// Runs a mutating closure as one atomic, serializable transaction.
    ///
    /// If the closure returns `Err`, no writes are committed.
    ///
    /// # Errors
    ///
    /// Returns whatever the closure returns, or a converted
    /// [`StoreError`] if the store itself fails.
    fn transaction<T, E>(&self, f: impl FnOnce(&mut Tables) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>;
}
