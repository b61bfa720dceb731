use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;
use bytes::Bytes;

/// Sets the given keys to their respective values. MSET replaces existing values with new values,
/// just as regular SET. All the given keys are set at once.
///
/// Ref: <https://redis.io/docs/latest/commands/mset/>
#[derive(Debug, PartialEq)]
pub struct Mset {
    pub pairs: Vec<(String, Bytes)>,
}

impl Executable for Mset {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        engine.mset(self.pairs);
        Ok(Reply::ok())
    }
}

impl TryFrom<&mut CommandParser> for Mset {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let mut pairs = vec![];

        loop {
            match parser.next_string() {
                Ok(key) => {
                    let value = parser.next_bytes()?;
                    pairs.push((key, value));
                }
                Err(CommandParserError::EndOfStream) if !pairs.is_empty() => {
                    break;
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(Self { pairs })
    }
}
