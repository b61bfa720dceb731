use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Returns the rank of `member` in the sorted set stored at `key`, with the scores ordered from
/// low to high. The rank is 0-based, which means that the member with the lowest score has rank 0.
///
/// Ref: <https://redis.io/docs/latest/commands/zrank/>
#[derive(Debug, PartialEq)]
pub struct Zrank {
    pub key: String,
    pub member: Bytes,
}

impl Executable for Zrank {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.zrank(&self.key, &self.member) {
            Ok(rank) => Ok(rank.map_or(Reply::Null, Reply::count)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Zrank {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let member = parser.next_bytes()?;

        Ok(Self { key, member })
    }
}
