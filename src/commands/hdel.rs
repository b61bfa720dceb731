use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Removes the specified fields from the hash stored at `key`. Specified fields that do not exist
/// within this hash are ignored. Deleting the last field removes the key.
///
/// Ref: <https://redis.io/docs/latest/commands/hdel/>
#[derive(Debug, PartialEq)]
pub struct Hdel {
    pub key: String,
    pub fields: Vec<Bytes>,
}

impl Executable for Hdel {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.hdel(&self.key, &self.fields) {
            Ok(removed) => Ok(Reply::count(removed)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Hdel {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let fields = parser.next_values()?;

        Ok(Self { key, fields })
    }
}
