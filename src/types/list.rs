use bytes::Bytes;
use std::collections::VecDeque;

use crate::types::{normalize_index, normalize_range};

/// The end of a list an element is pushed to or popped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum End {
    Left,
    Right,
}

/// An ordered sequence of elements, duplicates allowed. Indices are 0 based from the left, and
/// negative indices address elements from the right, `-1` being the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListValue {
    items: VecDeque<Bytes>,
}

impl ListValue {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pushes every value, one at a time, onto the given end and returns the new length.
    ///
    /// Pushing `[A, B, C]` to the right yields `..., A, B, C`, while pushing them to the left
    /// yields `C, B, A, ...`.
    pub fn push(&mut self, end: End, values: impl IntoIterator<Item = Bytes>) -> usize {
        for value in values {
            match end {
                End::Left => self.items.push_front(value),
                End::Right => self.items.push_back(value),
            }
        }

        self.items.len()
    }

    pub fn pop(&mut self, end: End) -> Option<Bytes> {
        match end {
            End::Left => self.items.pop_front(),
            End::Right => self.items.pop_back(),
        }
    }

    pub fn index(&self, index: i64) -> Option<Bytes> {
        normalize_index(index, self.items.len()).map(|index| self.items[index].clone())
    }

    /// Returns the elements between `start` and `end`, both inclusive.
    pub fn range(&self, start: i64, end: i64) -> Vec<Bytes> {
        match normalize_range(start, end, self.items.len()) {
            Some((start, end)) => self.items.range(start..=end).cloned().collect(),
            None => vec![],
        }
    }

    /// Keeps only the elements between `start` and `end`, both inclusive. An empty range clears
    /// the list.
    pub fn trim(&mut self, start: i64, end: i64) {
        match normalize_range(start, end, self.items.len()) {
            Some((start, end)) => {
                self.items.truncate(end + 1);
                self.items.drain(..start);
            }
            None => self.items.clear(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bytes> {
        self.items.iter()
    }
}

impl FromIterator<Bytes> for ListValue {
    fn from_iter<I: IntoIterator<Item = Bytes>>(iter: I) -> Self {
        ListValue {
            items: iter.into_iter().collect(),
        }
    }
}
