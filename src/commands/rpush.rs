use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Insert all the specified values at the tail of the list stored at `key`, in the order they are
/// given. If `key` does not exist, it is created as empty list before performing the push
/// operation.
///
/// Ref: <https://redis.io/docs/latest/commands/rpush/>
#[derive(Debug, PartialEq)]
pub struct Rpush {
    pub key: String,
    pub values: Vec<Bytes>,
}

impl Executable for Rpush {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.rpush(&self.key, self.values) {
            Ok(len) => Ok(Reply::count(len)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Rpush {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let values = parser.next_values()?;

        Ok(Self { key, values })
    }
}
