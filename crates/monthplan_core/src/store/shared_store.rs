//! Serialized, cloneable handle over one `DomainStore`.
//!
//! # Responsibility
//! - Serialize every read and write behind a single mutex.
//! - Expose change subscriptions to UI adapters.
//!
//! # Invariants
//! - A closure passed to `read`/`write` observes a state that is fully
//!   before or fully after any other mutation.
//! - A poisoned lock is recovered; access never panics.

use crate::clock::Clock;
use crate::config::SeedConfig;
use crate::store::domain_store::DomainStore;
use crate::store::event::StoreEvent;
use log::warn;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared handle; clones point at the same store.
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<DomainStore>>,
}

impl Default for SharedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl From<DomainStore> for SharedStore {
    fn from(store: DomainStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }
}

impl SharedStore {
    /// Wraps a fresh store on the system clock with default seeds.
    pub fn new() -> Self {
        DomainStore::new().into()
    }

    pub fn with_config(clock: Arc<dyn Clock>, seed: SeedConfig) -> Self {
        DomainStore::with_config(clock, seed).into()
    }

    /// Runs a query against a consistent snapshot of the store.
    pub fn read<T>(&self, f: impl FnOnce(&DomainStore) -> T) -> T {
        f(&*self.lock())
    }

    /// Runs a mutation with exclusive access to the store.
    pub fn write<T>(&self, f: impl FnOnce(&mut DomainStore) -> T) -> T {
        f(&mut *self.lock())
    }

    /// Receives one event per applied mutation from now on.
    pub fn subscribe(&self) -> Receiver<StoreEvent> {
        self.lock().subscribe()
    }

    pub fn version(&self) -> u64 {
        self.lock().version()
    }

    fn lock(&self) -> MutexGuard<'_, DomainStore> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("event=store_lock module=store status=recovered reason=poisoned");
            poisoned.into_inner()
        })
    }
}
