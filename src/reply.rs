use bytes::Bytes;
use std::fmt::{self, Write};

use crate::store::StoreError;

/// The result of executing a command.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    Simple(String),
    Error(String),
    Integer(i64),
    Bulk(Bytes),
    Null,
    Array(Vec<Reply>),
}

impl Reply {
    pub fn ok() -> Reply {
        Reply::Simple("OK".to_string())
    }

    /// A bulk string, or `Null` when there is no value.
    pub fn optional(value: Option<Bytes>) -> Reply {
        value.map_or(Reply::Null, Reply::Bulk)
    }

    pub fn bulks(values: impl IntoIterator<Item = Bytes>) -> Reply {
        Reply::Array(values.into_iter().map(Reply::Bulk).collect())
    }

    /// Floats travel as bulk strings, in their shortest decimal representation.
    pub fn float(value: f64) -> Reply {
        Reply::Bulk(Bytes::from(value.to_string()))
    }

    pub fn count(count: usize) -> Reply {
        Reply::Integer(count as i64)
    }

    fn lines(&self) -> Vec<String> {
        match self {
            Reply::Simple(s) => vec![s.clone()],
            Reply::Error(msg) => vec![format!("(error) {}", msg)],
            Reply::Integer(i) => vec![format!("(integer) {}", i)],
            Reply::Bulk(bytes) => vec![quote(bytes)],
            Reply::Null => vec!["(nil)".to_string()],
            Reply::Array(items) if items.is_empty() => vec!["(empty array)".to_string()],
            Reply::Array(items) => {
                let width = items.len().to_string().len();
                let mut lines = vec![];

                for (i, item) in items.iter().enumerate() {
                    let label = format!("{:>width$}) ", i + 1);
                    let padding = " ".repeat(label.len());

                    for (j, line) in item.lines().into_iter().enumerate() {
                        let prefix = if j == 0 { &label } else { &padding };
                        lines.push(format!("{}{}", prefix, line));
                    }
                }

                lines
            }
        }
    }
}

impl From<StoreError> for Reply {
    fn from(err: StoreError) -> Self {
        Reply::Error(err.to_string())
    }
}

impl From<bool> for Reply {
    fn from(value: bool) -> Self {
        Reply::Integer(value as i64)
    }
}

/// Renders like `redis-cli` does.
impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

fn quote(bytes: &[u8]) -> String {
    let mut quoted = String::with_capacity(bytes.len() + 2);
    quoted.push('"');

    for &byte in bytes {
        match byte {
            b'"' => quoted.push_str("\\\""),
            b'\\' => quoted.push_str("\\\\"),
            b'\n' => quoted.push_str("\\n"),
            b'\r' => quoted.push_str("\\r"),
            b'\t' => quoted.push_str("\\t"),
            0x20..=0x7e => quoted.push(byte as char),
            _ => {
                let _ = write!(quoted, "\\x{:02x}", byte);
            }
        }
    }

    quoted.push('"');
    quoted
}
