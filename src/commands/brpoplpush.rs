use std::time::Duration;

use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// BRPOPLPUSH is the blocking variant of RPOPLPUSH. When `source` is empty, the caller waits until
/// another one pushes to it or the timeout is reached. A timeout of zero waits forever.
///
/// Ref: <https://redis.io/docs/latest/commands/brpoplpush/>
#[derive(Debug, PartialEq)]
pub struct Brpoplpush {
    pub source: String,
    pub destination: String,
    pub timeout: Option<Duration>,
}

impl Brpoplpush {
    pub async fn exec(self, engine: Engine) -> Result<Reply, Error> {
        let res = engine
            .brpoplpush(&self.source, &self.destination, self.timeout)
            .await;

        match res {
            Ok(value) => Ok(Reply::optional(value)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Brpoplpush {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let source = parser.next_string()?;
        let destination = parser.next_string()?;
        let timeout = parser.next_timeout()?;

        Ok(Self {
            source,
            destination,
            timeout,
        })
    }
}
