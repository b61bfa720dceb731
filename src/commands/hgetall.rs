use itertools::Itertools;

use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Returns all fields and values of the hash stored at `key`. In the returned value, every field
/// name is followed by its value. Fields come sorted so the output is stable.
///
/// Ref: <https://redis.io/docs/latest/commands/hgetall/>
#[derive(Debug, PartialEq)]
pub struct Hgetall {
    pub key: String,
}

impl Executable for Hgetall {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.hgetall(&self.key) {
            Ok(pairs) => Ok(Reply::bulks(
                pairs
                    .into_iter()
                    .sorted()
                    .flat_map(|(field, value)| [field, value]),
            )),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Hgetall {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        Ok(Self { key })
    }
}
