use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Increments the score of `member` in the sorted set stored at `key` by `increment`. If `member`
/// does not exist in the sorted set, it is added with `increment` as its score.
///
/// Ref: <https://redis.io/docs/latest/commands/zincrby/>
#[derive(Debug, PartialEq)]
pub struct ZincrBy {
    pub key: String,
    pub increment: f64,
    pub member: Bytes,
}

impl Executable for ZincrBy {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.zincrby(&self.key, self.member, self.increment) {
            Ok(score) => Ok(Reply::float(score)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for ZincrBy {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let increment = parser.next_float()?;
        let member = parser.next_bytes()?;

        Ok(Self {
            key,
            increment,
            member,
        })
    }
}
