use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Returns the bit value at `offset` in the string value stored at `key`. Offsets past the end of
/// the string, and missing keys, read as 0.
///
/// Ref: <https://redis.io/docs/latest/commands/getbit/>
#[derive(Debug, PartialEq)]
pub struct Getbit {
    pub key: String,
    pub offset: u64,
}

impl Executable for Getbit {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.get_bit(&self.key, self.offset) {
            Ok(bit) => Ok(Reply::from(bit)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Getbit {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let offset = next_offset(parser)?;

        Ok(Self { key, offset })
    }
}

/// A bit offset, rejected when negative. The upper bound is checked by the engine.
pub(crate) fn next_offset(parser: &mut CommandParser) -> Result<u64, CommandParserError> {
    let offset = parser.next_integer()?;

    u64::try_from(offset).map_err(|_| CommandParserError::InvalidArgument {
        expected: "non negative bit offset".to_string(),
        actual: offset.to_string(),
    })
}
