use std::sync::Arc;

use arc_swap::ArcSwap;
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::{info::schema::InfoField, runtime::value::Value};

/// Backing store for the fields of one info class.
///
/// Implementations only guarantee that a single field read or write is atomic;
/// nothing is promised about consistency across fields.
pub trait InfoStorage: Send + Sync {
    fn load(&self, field: InfoField) -> Value;

    fn store(&self, field: InfoField, value: Value);

    /// Reads the current level if it is an integer.
    ///
    /// This sits on the suppression fast path, so implementations should
    /// avoid cloning when they can.
    fn level_as_int(&self) -> Option<i64> {
        self.load(InfoField::CurrentLevel).as_int()
    }
}

/// Which [`InfoStorage`] implementation a new info class gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageKind {
    /// One positional record behind one lock.
    Record,
    /// Fields keyed by [`InfoField`], each an independent atomic cell.
    Keyed,
}

impl Default for StorageKind {
    fn default() -> Self {
        if cfg!(feature = "threads") {
            StorageKind::Keyed
        } else {
            StorageKind::Record
        }
    }
}

impl StorageKind {
    pub fn build(self, fields: [Value; InfoField::COUNT]) -> Arc<dyn InfoStorage> {
        match self {
            StorageKind::Record => Arc::new(RecordStorage::new(fields)),
            StorageKind::Keyed => Arc::new(KeyedStorage::new(fields)),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StorageKind::Record => "record",
            StorageKind::Keyed => "keyed",
        }
    }
}

/// Plain positional record, the layout used by single-threaded builds.
pub struct RecordStorage {
    record: Mutex<[Value; InfoField::COUNT]>,
}

impl RecordStorage {
    pub fn new(fields: [Value; InfoField::COUNT]) -> Self {
        Self {
            record: Mutex::new(fields),
        }
    }
}

impl InfoStorage for RecordStorage {
    fn load(&self, field: InfoField) -> Value {
        self.record.lock()[field.index()].clone()
    }

    fn store(&self, field: InfoField, value: Value) {
        self.record.lock()[field.index()] = value;
    }

    fn level_as_int(&self) -> Option<i64> {
        self.record.lock()[InfoField::CurrentLevel.index()].as_int()
    }
}

/// Store keyed by field identity; reads never block writers.
///
/// The key set is fixed at construction, so lookups never miss.
pub struct KeyedStorage {
    slots: IndexMap<InfoField, ArcSwap<Value>>,
}

impl KeyedStorage {
    pub fn new(fields: [Value; InfoField::COUNT]) -> Self {
        let slots = InfoField::ALL
            .into_iter()
            .zip(fields)
            .map(|(field, value)| (field, ArcSwap::from_pointee(value)))
            .collect();
        Self { slots }
    }
}

impl InfoStorage for KeyedStorage {
    fn load(&self, field: InfoField) -> Value {
        self.slots
            .get(&field)
            .map(|slot| Value::clone(&slot.load()))
            .unwrap_or(Value::None)
    }

    fn store(&self, field: InfoField, value: Value) {
        if let Some(slot) = self.slots.get(&field) {
            slot.store(Arc::new(value));
        }
    }

    fn level_as_int(&self) -> Option<i64> {
        self.slots
            .get(&InfoField::CurrentLevel)
            .and_then(|slot| slot.load().as_int())
    }
}
