//! Payloads a key can hold. Each module implements the operations of one value kind and knows
//! nothing about keys, locking or blocking; that is handled by the store and the engine.

pub mod hash;
pub mod list;
pub mod set;
pub mod sorted_set;
pub mod string;

pub use hash::HashValue;
pub use list::{End, ListValue};
pub use set::SetValue;
pub use sorted_set::{Aggregate, SortedSetValue};
pub use string::StringValue;

use std::fmt::Display;
use std::str::{self, FromStr};

use crate::store::StoreError;

/// Numeric interpretation requested by an increment operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Integer,
    Float,
}

impl NumberKind {
    pub(crate) fn describe(self) -> &'static str {
        match self {
            NumberKind::Integer => "an integer or out of range",
            NumberKind::Float => "a valid float",
        }
    }
}

/// A number stored as its decimal representation and updated by the increment family.
pub trait Number: FromStr + Display + Copy {
    const KIND: NumberKind;
    const ZERO: Self;

    /// Returns `None` when the sum can't be represented: integer overflow, or a float result
    /// that is NaN or infinite.
    fn checked_add(self, rhs: Self) -> Option<Self>;
}

impl Number for i64 {
    const KIND: NumberKind = NumberKind::Integer;
    const ZERO: Self = 0;

    fn checked_add(self, rhs: Self) -> Option<Self> {
        i64::checked_add(self, rhs)
    }
}

impl Number for f64 {
    const KIND: NumberKind = NumberKind::Float;
    const ZERO: Self = 0.0;

    fn checked_add(self, rhs: Self) -> Option<Self> {
        let sum = self + rhs;
        sum.is_finite().then_some(sum)
    }
}

/// Adds `delta` to the number encoded in `current`, treating a missing value as zero.
pub(crate) fn add<T: Number>(current: Option<&[u8]>, delta: T) -> Result<T, StoreError> {
    let err = StoreError::NotANumber { expected: T::KIND };

    let current = match current {
        Some(bytes) => str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.parse::<T>().ok())
            .ok_or(err.clone())?,
        None => T::ZERO,
    };

    current.checked_add(delta).ok_or(err)
}

/// Resolves the inclusive range `start..=end` over a sequence of `len` elements. Negative indices
/// count from the end, so `-1` is the last element. Out of range indices are clamped; `None` means
/// the range selects nothing.
pub(crate) fn normalize_range(start: i64, end: i64, len: usize) -> Option<(usize, usize)> {
    let len = len as i64;

    let start = if start < 0 { (len + start).max(0) } else { start };
    let end = if end < 0 { len + end } else { end.min(len - 1) };

    if start > end || start >= len {
        return None;
    }

    Some((start as usize, end as usize))
}

/// Resolves a single, possibly negative, index.
pub(crate) fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let index = if index < 0 { len + index } else { index };

    (0..len).contains(&index).then_some(index as usize)
}
