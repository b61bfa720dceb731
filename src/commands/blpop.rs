use bytes::Bytes;
use std::time::Duration;

use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::store::StoreError;
use crate::Error;

/// BLPOP is the blocking version of LPOP: when the list at `key` is empty, the caller waits until
/// another one pushes to it, or until `timeout` seconds elapse. A timeout of zero waits forever.
///
/// Callers blocked on the same key are served in the order they started waiting. Replies with the
/// key and the popped element, or `nil` when the timeout elapses.
///
/// Ref: <https://redis.io/docs/latest/commands/blpop/>
#[derive(Debug, PartialEq)]
pub struct Blpop {
    pub key: String,
    pub timeout: Option<Duration>,
}

impl Blpop {
    pub async fn exec(self, engine: Engine) -> Result<Reply, Error> {
        let res = engine.blpop(&self.key, self.timeout).await;
        Ok(popped(self.key, res))
    }
}

impl TryFrom<&mut CommandParser> for Blpop {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let timeout = parser.next_timeout()?;

        Ok(Self { key, timeout })
    }
}

/// The reply shared by the blocking pops.
pub(crate) fn popped(key: String, res: Result<Option<Bytes>, StoreError>) -> Reply {
    match res {
        Ok(Some(value)) => Reply::Array(vec![Reply::Bulk(Bytes::from(key)), Reply::Bulk(value)]),
        Ok(None) => Reply::Null,
        Err(err) => err.into(),
    }
}
