//! In-memory collection store with change notification.
//!
//! Holds the three entity sequences. Key-based operations are the only
//! mutation surface; every effective change is published as a [`StoreEvent`].

mod collection;

pub use collection::*;

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tokio::sync::broadcast;

use crate::models::{EntityKind, LabTechnician, LipidProfile, Patient};

const EVENT_CAPACITY: usize = 256;

/// What happened to a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreChange {
    Replaced { count: usize },
    Appended { key: String },
    Updated { key: String },
    Removed { key: String },
}

/// Published after every effective store mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreEvent {
    pub kind: EntityKind,
    pub change: StoreChange,
}

/// An entity kind the store holds.
pub trait Record: Keyed + Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn slot(store: &CollectionStore) -> &RwLock<Collection<Self>>;
}

impl Keyed for Patient {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for LabTechnician {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for LipidProfile {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Record for Patient {
    const KIND: EntityKind = EntityKind::Patient;

    fn slot(store: &CollectionStore) -> &RwLock<Collection<Self>> {
        &store.patients
    }
}

impl Record for LabTechnician {
    const KIND: EntityKind = EntityKind::LabTechnician;

    fn slot(store: &CollectionStore) -> &RwLock<Collection<Self>> {
        &store.technicians
    }
}

impl Record for LipidProfile {
    const KIND: EntityKind = EntityKind::LipidProfile;

    fn slot(store: &CollectionStore) -> &RwLock<Collection<Self>> {
        &store.results
    }
}

/// Point-in-time copy of all three collections.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub patients: Vec<Patient>,
    pub lab_technicians: Vec<LabTechnician>,
    pub results: Vec<LipidProfile>,
}

impl StoreSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// The three collections behind locks, plus an event channel.
pub struct CollectionStore {
    patients: RwLock<Collection<Patient>>,
    technicians: RwLock<Collection<LabTechnician>>,
    results: RwLock<Collection<LipidProfile>>,
    events: broadcast::Sender<StoreEvent>,
}

impl Default for CollectionStore {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }
}

impl CollectionStore {
    /// Create a store with initial contents.
    pub fn new(
        patients: Vec<Patient>,
        technicians: Vec<LabTechnician>,
        results: Vec<LipidProfile>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            patients: RwLock::new(Collection::new(patients)),
            technicians: RwLock::new(Collection::new(technicians)),
            results: RwLock::new(Collection::new(results)),
            events,
        }
    }

    /// Receive every change published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    fn read<T: Record>(&self) -> RwLockReadGuard<'_, Collection<T>> {
        T::slot(self).read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write<T: Record>(&self) -> RwLockWriteGuard<'_, Collection<T>> {
        T::slot(self).write().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish<T: Record>(&self, change: StoreChange) {
        // No receivers is fine.
        let _ = self.events.send(StoreEvent {
            kind: T::KIND,
            change,
        });
    }

    /// Current contents of one collection, in order.
    pub fn snapshot<T: Record>(&self) -> Vec<T> {
        self.read::<T>().items().to_vec()
    }

    pub fn snapshot_all(&self) -> StoreSnapshot {
        StoreSnapshot {
            patients: self.snapshot(),
            lab_technicians: self.snapshot(),
            results: self.snapshot(),
        }
    }

    pub fn len<T: Record>(&self) -> usize {
        self.read::<T>().len()
    }

    pub fn find<T: Record>(&self, key: &str) -> Option<T> {
        self.read::<T>().find(key).cloned()
    }

    pub fn contains<T: Record>(&self, key: &str) -> bool {
        self.read::<T>().contains(key)
    }

    /// Replace a whole collection unless `items` is empty.
    pub fn replace_all<T: Record>(&self, items: Vec<T>) -> bool {
        let count = items.len();
        let replaced = self.write::<T>().replace_all(items);
        if replaced {
            self.publish::<T>(StoreChange::Replaced { count });
        }
        replaced
    }

    pub fn append<T: Record>(&self, item: T) {
        let key = item.key().to_string();
        self.write::<T>().append(item);
        self.publish::<T>(StoreChange::Appended { key });
    }

    /// Append with an identifier computed from the current length, under one lock.
    pub fn append_with<T: Record>(&self, build: impl FnOnce(usize) -> T) -> T {
        let item = {
            let mut collection = self.write::<T>();
            let item = build(collection.len());
            collection.append(item.clone());
            item
        };
        self.publish::<T>(StoreChange::Appended {
            key: item.key().to_string(),
        });
        item
    }

    pub fn replace_by_key<T: Record>(&self, key: &str, item: T) -> bool {
        let replaced = self.write::<T>().replace_by_key(key, item);
        if replaced {
            self.publish::<T>(StoreChange::Updated {
                key: key.to_string(),
            });
        }
        replaced
    }

    pub fn remove_by_key<T: Record>(&self, key: &str) -> bool {
        let removed = self.write::<T>().remove_by_key(key) > 0;
        if removed {
            self.publish::<T>(StoreChange::Removed {
                key: key.to_string(),
            });
        }
        removed
    }
}
