use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Returns the substring of the string value stored at `key`, determined by the offsets `start`
/// and `end` (both are inclusive). Negative offsets can be used in order to provide an offset
/// starting from the end of the string. So -1 means the last character, -2 the penultimate and so
/// forth.
///
/// Ref: <https://redis.io/docs/latest/commands/getrange/>
#[derive(Debug, PartialEq)]
pub struct Getrange {
    pub key: String,
    pub start: i64,
    pub end: i64,
}

impl Executable for Getrange {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.get_range(&self.key, self.start, self.end) {
            Ok(value) => Ok(Reply::Bulk(value)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Getrange {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let start = parser.next_integer()?;
        let end = parser.next_integer()?;

        Ok(Self { key, start, end })
    }
}
