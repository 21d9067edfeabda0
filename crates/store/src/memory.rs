// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::StoreError;
use crate::tables::Tables;
use crate::Store;
use std::sync::Mutex;

/// The in-memory reference backend.
///
/// One mutex serializes every transaction, so two concurrent assignment
/// requests cannot both pass the conflict check: the second transaction
/// observes the first one's commit.
/// Rollback is by snapshot: the closure runs against a copy of the
/// tables, and the copy is swapped in only on success.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with existing tables.
    #[must_use]
    pub fn with_tables(tables: Tables) -> Self {
        Self {
            tables: Mutex::new(tables),
        }
    }
}

impl Store for MemoryStore {
    fn read<T, E>(&self, f: impl FnOnce(&Tables) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let guard = self
            .tables
            .lock()
            .map_err(|_| E::from(StoreError::Poisoned))?;
        f(&guard)
    }

    fn transaction<T, E>(&self, f: impl FnOnce(&mut Tables) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut guard = self
            .tables
            .lock()
            .map_err(|_| E::from(StoreError::Poisoned))?;
        let mut working: Tables = guard.clone();
        match f(&mut working) {
            Ok(value) => {
                *guard = working;
                Ok(value)
            }
            Err(err) => {
                tracing::debug!("transaction rolled back");
                Err(err)
            }
        }
    }
}
