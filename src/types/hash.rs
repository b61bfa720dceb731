use bytes::Bytes;
use std::collections::HashMap;

use crate::store::StoreError;
use crate::types::{add, Number};

/// A mapping from unique fields to values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashValue {
    fields: HashMap<Bytes, Bytes>,
}

impl HashValue {
    /// Sets every field to its value and returns how many fields were not present before.
    pub fn put_all(&mut self, pairs: impl IntoIterator<Item = (Bytes, Bytes)>) -> usize {
        pairs
            .into_iter()
            .filter(|(field, value)| self.fields.insert(field.clone(), value.clone()).is_none())
            .count()
    }

    pub fn get(&self, field: &Bytes) -> Option<Bytes> {
        self.fields.get(field).cloned()
    }

    /// Looks up every field, in the order they are given.
    pub fn multi_get<'a>(
        &self,
        fields: impl IntoIterator<Item = &'a Bytes>,
    ) -> Vec<Option<Bytes>> {
        fields.into_iter().map(|field| self.get(field)).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Removes the given fields and returns how many of them were present.
    pub fn delete<'a>(&mut self, fields: impl IntoIterator<Item = &'a Bytes>) -> usize {
        fields
            .into_iter()
            .filter(|field| self.fields.remove(*field).is_some())
            .count()
    }

    pub fn exists(&self, field: &Bytes) -> bool {
        self.fields.contains_key(field)
    }

    /// Adds `delta` to the number stored in `field`, a missing field starting from 0.
    pub fn increment<T: Number>(&mut self, field: Bytes, delta: T) -> Result<T, StoreError> {
        let next = add(self.fields.get(&field).map(|value| value.as_ref()), delta)?;
        self.fields.insert(field, Bytes::from(next.to_string()));
        Ok(next)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Bytes, &Bytes)> {
        self.fields.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Bytes> {
        self.fields.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Bytes> {
        self.fields.values()
    }
}
