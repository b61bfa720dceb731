use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Sets the specified fields to their respective values in the hash stored at `key`. This command
/// overwrites the values of specified fields that exist in the hash. If `key` doesn't exist, a new
/// key holding a hash is created.
///
/// Ref: <https://redis.io/docs/latest/commands/hset/>
#[derive(Debug, PartialEq)]
pub struct Hset {
    pub key: String,
    pub pairs: Vec<(Bytes, Bytes)>,
}

impl Executable for Hset {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.hset(&self.key, self.pairs) {
            Ok(added) => Ok(Reply::count(added)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Hset {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let pairs = parser.next_pairs()?;

        Ok(Self { key, pairs })
    }
}
