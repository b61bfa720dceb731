use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Returns PONG if no argument is provided, otherwise return a copy of the argument as a bulk.
///
/// Ref: <https://redis.io/docs/latest/commands/ping>
#[derive(Debug, PartialEq)]
pub struct Ping {
    pub payload: Option<Bytes>,
}

impl Executable for Ping {
    fn exec(self, _engine: Engine) -> Result<Reply, Error> {
        let res = self
            .payload
            .map_or(Reply::Simple("PONG".to_string()), Reply::Bulk);

        Ok(res)
    }
}

impl TryFrom<&mut CommandParser> for Ping {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let payload = match parser.next_bytes() {
            Ok(payload) => Some(payload),
            Err(CommandParserError::EndOfStream) => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Self { payload })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;

    #[tokio::test]
    async fn without_payload() {
        let cmd = Command::try_from(vec![Bytes::from("PING")]).unwrap();
        assert_eq!(cmd, Command::Ping(Ping { payload: None }));

        let res = cmd.exec(Engine::new()).await.unwrap();
        assert_eq!(res, Reply::Simple("PONG".to_string()));
    }

    #[tokio::test]
    async fn with_payload() {
        let cmd = Command::try_from(vec![Bytes::from("PING"), Bytes::from("hello")]).unwrap();

        let res = cmd.exec(Engine::new()).await.unwrap();
        assert_eq!(res, Reply::Bulk(Bytes::from("hello")));
    }
}
