use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Returns the values associated with the specified fields in the hash stored at `key`. Missing
/// fields, or a missing key, give nil values.
///
/// Ref: <https://redis.io/docs/latest/commands/hmget/>
#[derive(Debug, PartialEq)]
pub struct Hmget {
    pub key: String,
    pub fields: Vec<Bytes>,
}

impl Executable for Hmget {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.hmget(&self.key, &self.fields) {
            Ok(values) => Ok(Reply::Array(
                values.into_iter().map(Reply::optional).collect(),
            )),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Hmget {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let fields = parser.next_values()?;

        Ok(Self { key, fields })
    }
}
