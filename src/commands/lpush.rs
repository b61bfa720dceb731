use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Insert all the specified values at the head of the list stored at `key`. If `key` does not
/// exist, it is created as empty list before performing the push operations.
///
/// Elements are inserted one after the other, from the leftmost element to the rightmost, so
/// `LPUSH mylist a b c` results in a list containing `c` as first element, `b` as second element
/// and `a` as third element.
///
/// Ref: <https://redis.io/docs/latest/commands/lpush/>
#[derive(Debug, PartialEq)]
pub struct Lpush {
    pub key: String,
    pub values: Vec<Bytes>,
}

impl Executable for Lpush {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.lpush(&self.key, self.values) {
            Ok(len) => Ok(Reply::count(len)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Lpush {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let values = parser.next_values()?;

        Ok(Self { key, values })
    }
}
