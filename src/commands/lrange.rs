use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Returns the specified elements of the list stored at `key`. The offsets `start` and `stop` are
/// zero-based indexes, both inclusive, and can be negative numbers indicating offsets from the end
/// of the list. Out of range indexes will not produce an error.
///
/// Ref: <https://redis.io/docs/latest/commands/lrange/>
#[derive(Debug, PartialEq)]
pub struct Lrange {
    pub key: String,
    pub start: i64,
    pub stop: i64,
}

impl Executable for Lrange {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.lrange(&self.key, self.start, self.stop) {
            Ok(values) => Ok(Reply::bulks(values)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Lrange {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let start = parser.next_integer()?;
        let stop = parser.next_integer()?;

        Ok(Self { key, start, stop })
    }
}
