use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Increment the specified `field` of a hash stored at `key`, and representing a floating point
/// number, by the specified `increment`.
///
/// Ref: <https://redis.io/docs/latest/commands/hincrbyfloat/>
#[derive(Debug, PartialEq)]
pub struct HincrByFloat {
    pub key: String,
    pub field: Bytes,
    pub increment: f64,
}

impl Executable for HincrByFloat {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.hincr_by_float(&self.key, self.field, self.increment) {
            Ok(value) => Ok(Reply::float(value)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for HincrByFloat {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let field = parser.next_bytes()?;
        let increment = parser.next_float()?;

        Ok(Self {
            key,
            field,
            increment,
        })
    }
}
