use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Trim an existing list so that it will contain only the specified range of elements. When the
/// range is empty the list, and so the key, is removed.
///
/// Ref: <https://redis.io/docs/latest/commands/ltrim/>
#[derive(Debug, PartialEq)]
pub struct Ltrim {
    pub key: String,
    pub start: i64,
    pub stop: i64,
}

impl Executable for Ltrim {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.ltrim(&self.key, self.start, self.stop) {
            Ok(()) => Ok(Reply::ok()),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Ltrim {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let start = parser.next_integer()?;
        let stop = parser.next_integer()?;

        Ok(Self { key, start, stop })
    }
}
