use std::time::Duration;

use crate::commands::blpop::popped;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// BRPOP is the blocking version of RPOP, popping from the tail of the list. See BLPOP for the
/// details.
///
/// Ref: <https://redis.io/docs/latest/commands/brpop/>
#[derive(Debug, PartialEq)]
pub struct Brpop {
    pub key: String,
    pub timeout: Option<Duration>,
}

impl Brpop {
    pub async fn exec(self, engine: Engine) -> Result<Reply, Error> {
        let res = engine.brpop(&self.key, self.timeout).await;
        Ok(popped(self.key, res))
    }
}

impl TryFrom<&mut CommandParser> for Brpop {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let timeout = parser.next_timeout()?;

        Ok(Self { key, timeout })
    }
}
