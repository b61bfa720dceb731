use itertools::Itertools;

use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Returns the members of the set resulting from the difference between the first set and all the
/// successive sets. Keys that do not exist are considered to be empty sets.
///
/// Ref: <https://redis.io/docs/latest/commands/sdiff/>
#[derive(Debug, PartialEq)]
pub struct Sdiff {
    pub keys: Vec<String>,
}

impl Executable for Sdiff {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.sdiff(&self.keys) {
            Ok(members) => Ok(Reply::bulks(members.into_iter().sorted())),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Sdiff {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let keys = parser.next_keys()?;
        Ok(Self { keys })
    }
}
