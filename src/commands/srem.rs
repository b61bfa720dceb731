use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Remove the specified members from the set stored at `key`. Specified members that are not a
/// member of this set are ignored. The key is removed along with its last member.
///
/// Ref: <https://redis.io/docs/latest/commands/srem/>
#[derive(Debug, PartialEq)]
pub struct Srem {
    pub key: String,
    pub members: Vec<Bytes>,
}

impl Executable for Srem {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.srem(&self.key, &self.members) {
            Ok(removed) => Ok(Reply::count(removed)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Srem {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let members = parser.next_values()?;

        Ok(Self { key, members })
    }
}
