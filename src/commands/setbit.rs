use crate::commands::executable::Executable;
use crate::commands::getbit::next_offset;
use crate::commands::{CommandParser, CommandParserError};
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Sets or clears the bit at `offset` in the string value stored at `key`, growing the string as
/// needed. Returns the original bit value stored at `offset`.
///
/// Ref: <https://redis.io/docs/latest/commands/setbit/>
#[derive(Debug, PartialEq)]
pub struct Setbit {
    pub key: String,
    pub offset: u64,
    pub bit: bool,
}

impl Executable for Setbit {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.set_bit(&self.key, self.offset, self.bit) {
            Ok(previous) => Ok(Reply::from(previous)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Setbit {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let offset = next_offset(parser)?;
        let bit = match parser.next_integer()? {
            0 => false,
            1 => true,
            bit => {
                return Err(CommandParserError::InvalidArgument {
                    expected: "bit".to_string(),
                    actual: bit.to_string(),
                }
                .into())
            }
        };

        Ok(Self { key, offset, bit })
    }
}
