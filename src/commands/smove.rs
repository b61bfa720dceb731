use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Move `member` from the set at `source` to the set at `destination`. This operation is atomic:
/// at no point in time is the member present in both sets, or in neither.
///
/// If the source set does not exist or does not contain the specified element, no operation is
/// performed and 0 is returned.
///
/// Ref: <https://redis.io/docs/latest/commands/smove/>
#[derive(Debug, PartialEq)]
pub struct Smove {
    pub source: String,
    pub destination: String,
    pub member: Bytes,
}

impl Executable for Smove {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.smove(&self.source, &self.destination, self.member) {
            Ok(moved) => Ok(Reply::from(moved)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Smove {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let source = parser.next_string()?;
        let destination = parser.next_string()?;
        let member = parser.next_bytes()?;

        Ok(Self {
            source,
            destination,
            member,
        })
    }
}
