use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Add the specified members to the set stored at `key`. Specified members that are already a
/// member of this set are ignored. If `key` does not exist, a new set is created before adding the
/// specified members.
///
/// Ref: <https://redis.io/docs/latest/commands/sadd/>
#[derive(Debug, PartialEq)]
pub struct Sadd {
    pub key: String,
    pub members: Vec<Bytes>,
}

impl Executable for Sadd {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.sadd(&self.key, self.members) {
            Ok(added) => Ok(Reply::count(added)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Sadd {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let members = parser.next_values()?;

        Ok(Self { key, members })
    }
}
