use bytes::{Bytes, BytesMut};

use crate::store::StoreError;
use crate::types::{add, normalize_range, Number};

/// A binary safe string. Besides plain reads and writes, its content can be interpreted as a
/// decimal number by the increment family, and as a bit array by `get_bit` and `set_bit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringValue {
    data: BytesMut,
}

impl StringValue {
    pub fn new(data: impl AsRef<[u8]>) -> StringValue {
        StringValue {
            data: BytesMut::from(data.as_ref()),
        }
    }

    pub fn get(&self) -> Bytes {
        Bytes::copy_from_slice(&self.data)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Appends `value` and returns the new length.
    pub fn append(&mut self, value: &[u8]) -> usize {
        self.data.extend_from_slice(value);
        self.data.len()
    }

    /// Adds `delta` to the number held by this string and stores the result back as text.
    ///
    /// Fails without modifying the value when the content is not a number of the requested kind,
    /// or when the result is not representable.
    pub fn increment<T: Number>(&mut self, delta: T) -> Result<T, StoreError> {
        let next = add(Some(&self.data[..]), delta)?;
        self.data = BytesMut::from(next.to_string().as_bytes());
        Ok(next)
    }

    /// Returns the bytes between `start` and `end`, both inclusive. Negative offsets count from
    /// the end of the string.
    pub fn get_range(&self, start: i64, end: i64) -> Bytes {
        match normalize_range(start, end, self.data.len()) {
            Some((start, end)) => Bytes::copy_from_slice(&self.data[start..=end]),
            None => Bytes::new(),
        }
    }

    /// Overwrites part of the string starting at `offset`, zero padding it when the offset lies
    /// past the current end. Returns the new length.
    pub fn set_range(&mut self, offset: usize, value: &[u8]) -> usize {
        let end = offset + value.len();
        if self.data.len() < end {
            self.data.resize(end, 0);
        }

        self.data[offset..end].copy_from_slice(value);
        self.data.len()
    }

    /// Bits are addressed most significant first: offset 0 is the high bit of the first byte.
    pub fn get_bit(&self, offset: u64) -> bool {
        let (byte, mask) = bit_position(offset);

        self.data
            .get(byte)
            .map(|byte| byte & mask != 0)
            .unwrap_or(false)
    }

    /// Sets the bit at `offset`, growing the string with zero bytes as needed, and returns the
    /// bit's previous value.
    pub fn set_bit(&mut self, offset: u64, bit: bool) -> bool {
        let (byte, mask) = bit_position(offset);

        if self.data.len() <= byte {
            self.data.resize(byte + 1, 0);
        }

        let previous = self.data[byte] & mask != 0;
        if bit {
            self.data[byte] |= mask;
        } else {
            self.data[byte] &= !mask;
        }

        previous
    }
}

fn bit_position(offset: u64) -> (usize, u8) {
    let byte = (offset / 8) as usize;
    let mask = 0b1000_0000 >> (offset % 8);
    (byte, mask)
}

impl From<Bytes> for StringValue {
    fn from(data: Bytes) -> Self {
        StringValue::new(data)
    }
}

impl From<&str> for StringValue {
    fn from(data: &str) -> Self {
        StringValue::new(data)
    }
}
