use parking_lot::{ArcMutexGuard, Mutex, RawMutex};
use std::collections::{BTreeSet, HashMap};
use std::ops::Deref;
use std::sync::Arc;
use strum_macros::{AsRefStr, Display};
use thiserror::Error as ThisError;
use tracing::debug;

use crate::types::{HashValue, ListValue, NumberKind, SetValue, SortedSetValue, StringValue};

pub type Key = String;

#[derive(Debug, Clone, ThisError, PartialEq)]
pub enum StoreError {
    #[error("WRONGTYPE Operation against a key holding the wrong kind of value")]
    TypeMismatch { expected: Kind, actual: Kind },
    #[error("ERR value is not {}", .expected.describe())]
    NotANumber { expected: NumberKind },
    #[error("ERR bit offset is not an integer or out of range")]
    BitOffsetOutOfRange,
    #[error("ERR string exceeds maximum allowed size")]
    StringTooLong,
}

/// The kind of value a key holds. Its string form is the one reported by `TYPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Kind {
    String,
    List,
    Set,
    #[strum(serialize = "zset")]
    SortedSet,
    Hash,
}

/// The value held by a key: exactly one of the five kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    String(StringValue),
    List(ListValue),
    Set(SetValue),
    SortedSet(SortedSetValue),
    Hash(HashValue),
}

impl Entry {
    pub fn kind(&self) -> Kind {
        match self {
            Entry::String(_) => Kind::String,
            Entry::List(_) => Kind::List,
            Entry::Set(_) => Kind::Set,
            Entry::SortedSet(_) => Kind::SortedSet,
            Entry::Hash(_) => Kind::Hash,
        }
    }

    /// Containers are never kept empty, an empty string on the other hand is a regular value.
    fn is_empty(&self) -> bool {
        match self {
            Entry::String(_) => false,
            Entry::List(list) => list.is_empty(),
            Entry::Set(set) => set.is_empty(),
            Entry::SortedSet(sorted_set) => sorted_set.is_empty(),
            Entry::Hash(hash) => hash.is_empty(),
        }
    }
}

/// Typed access to the payload of an [`Entry`].
pub trait Payload: Default + Into<Entry> {
    const KIND: Kind;

    fn from_entry(entry: &Entry) -> Option<&Self>;
    fn from_entry_mut(entry: &mut Entry) -> Option<&mut Self>;
}

macro_rules! payload {
    ($type:ty, $variant:ident) => {
        impl From<$type> for Entry {
            fn from(value: $type) -> Self {
                Entry::$variant(value)
            }
        }

        impl Payload for $type {
            const KIND: Kind = Kind::$variant;

            fn from_entry(entry: &Entry) -> Option<&Self> {
                match entry {
                    Entry::$variant(value) => Some(value),
                    _ => None,
                }
            }

            fn from_entry_mut(entry: &mut Entry) -> Option<&mut Self> {
                match entry {
                    Entry::$variant(value) => Some(value),
                    _ => None,
                }
            }
        }
    };
}

payload!(StringValue, String);
payload!(ListValue, List);
payload!(SetValue, Set);
payload!(SortedSetValue, SortedSet);
payload!(HashValue, Hash);

/// The Store maps keys to their entries. Every key is guarded by its own lock so operations on
/// different keys never wait on each other, while operations on the same key are serialized.
///
/// Locks are handed out as [`KeyGuard`]s. A key exists only while it holds a non empty entry: the
/// guard removes the key from the store when it is released with no entry, or with an empty
/// container. The store is designed to be shared and cloned cheaply using reference counting.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<InnerStore>,
}

impl Store {
    pub fn new() -> Store {
        Store::default()
    }
}

impl Deref for Store {
    type Target = InnerStore;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

type Slot = Arc<Mutex<SlotState>>;

#[derive(Default)]
pub struct InnerStore {
    slots: Mutex<HashMap<Key, Slot>>,
}

#[derive(Default)]
struct SlotState {
    entry: Option<Entry>,
    // Set once the slot is dropped from the registry. Anyone still waiting on its lock must look
    // the key up again.
    detached: bool,
}

impl Store {
    /// Locks `key`, waiting for any other holder to release it.
    ///
    /// The registry lock is never held while waiting for a key lock, and a key guard only takes
    /// the registry lock when it's dropped, so guards can't deadlock with the registry.
    pub fn lock(&self, key: &str) -> KeyGuard {
        loop {
            let slot = {
                let mut slots = self.slots.lock();
                match slots.get(key) {
                    Some(slot) => slot.clone(),
                    None => slots.entry(key.to_string()).or_default().clone(),
                }
            };

            let state = slot.lock_arc();
            if !state.detached {
                return KeyGuard {
                    key: key.to_string(),
                    state,
                    store: self.clone(),
                };
            }
        }
    }

    /// Locks two keys in a fixed order, so concurrent callers locking the same pair in opposite
    /// directions can't deadlock. The guards are returned in argument order; the second one is
    /// `None` when both keys are the same.
    pub fn lock_pair(&self, first: &str, second: &str) -> (KeyGuard, Option<KeyGuard>) {
        if first == second {
            return (self.lock(first), None);
        }

        if first < second {
            let first = self.lock(first);
            let second = self.lock(second);
            (first, Some(second))
        } else {
            let second = self.lock(second);
            let first = self.lock(first);
            (first, Some(second))
        }
    }

    /// Locks every distinct key, in lexicographic order.
    pub fn lock_many<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> KeyGuards {
        let keys: BTreeSet<&str> = keys.into_iter().collect();
        let guards = keys.into_iter().map(|key| self.lock(key)).collect();

        KeyGuards { guards }
    }

    /// Keys currently holding a value.
    pub fn keys(&self) -> Vec<Key> {
        let slots: Vec<(Key, Slot)> = self
            .slots
            .lock()
            .iter()
            .map(|(key, slot)| (key.clone(), slot.clone()))
            .collect();

        slots
            .into_iter()
            .filter(|(_, slot)| {
                let state = slot.lock();
                !state.detached && state.entry.is_some()
            })
            .map(|(key, _)| key)
            .collect()
    }

    pub fn size(&self) -> usize {
        self.keys().len()
    }
}

/// Exclusive access to a single key, held until dropped.
pub struct KeyGuard {
    key: Key,
    state: ArcMutexGuard<RawMutex, SlotState>,
    store: Store,
}

impl KeyGuard {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn entry(&self) -> Option<&Entry> {
        self.state.entry.as_ref()
    }

    pub fn kind(&self) -> Option<Kind> {
        self.entry().map(Entry::kind)
    }

    pub fn exists(&self) -> bool {
        self.state.entry.is_some()
    }

    /// Fails with `TypeMismatch` if the key holds a kind other than `T`. A missing key passes.
    pub fn check<T: Payload>(&self) -> Result<(), StoreError> {
        match self.kind() {
            Some(actual) if actual != T::KIND => Err(StoreError::TypeMismatch {
                expected: T::KIND,
                actual,
            }),
            _ => Ok(()),
        }
    }

    /// The payload of this key, `None` if the key doesn't exist.
    pub fn get<T: Payload>(&self) -> Result<Option<&T>, StoreError> {
        self.check::<T>()?;
        Ok(self.entry().and_then(T::from_entry))
    }

    pub fn get_mut<T: Payload>(&mut self) -> Result<Option<&mut T>, StoreError> {
        self.check::<T>()?;
        Ok(self.state.entry.as_mut().and_then(T::from_entry_mut))
    }

    /// The payload of this key, creating an empty one if the key doesn't exist.
    pub fn get_or_create<T: Payload>(&mut self) -> Result<&mut T, StoreError> {
        self.check::<T>()?;

        let key = &self.key;
        let entry = self.state.entry.get_or_insert_with(|| {
            debug!(key = %key, kind = %T::KIND, "creating key");
            T::default().into()
        });

        let actual = entry.kind();
        T::from_entry_mut(entry).ok_or(StoreError::TypeMismatch {
            expected: T::KIND,
            actual,
        })
    }

    /// Replaces whatever the key holds, regardless of its kind.
    pub fn replace(&mut self, entry: impl Into<Entry>) -> Option<Entry> {
        self.state.entry.replace(entry.into())
    }

    pub fn remove(&mut self) -> Option<Entry> {
        self.state.entry.take()
    }
}

impl Drop for KeyGuard {
    fn drop(&mut self) {
        if self.state.entry.as_ref().is_some_and(Entry::is_empty) {
            self.state.entry = None;
        }

        if self.state.entry.is_some() {
            return;
        }

        let mut slots = self.store.slots.lock();
        let slot = ArcMutexGuard::mutex(&self.state);
        if slots.get(&self.key).is_some_and(|current| Arc::ptr_eq(current, slot)) {
            debug!(key = %self.key, "removing key");
            slots.remove(&self.key);
        }
        self.state.detached = true;
    }
}

/// Guards over several keys, acquired together by [`Store::lock_many`].
pub struct KeyGuards {
    // Sorted by key.
    guards: Vec<KeyGuard>,
}

impl KeyGuards {
    pub fn get(&self, key: &str) -> Option<&KeyGuard> {
        self.position(key).map(|index| &self.guards[index])
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut KeyGuard> {
        self.position(key).map(|index| &mut self.guards[index])
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.guards
            .binary_search_by(|guard| guard.key().cmp(key))
            .ok()
    }
}
