use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Set `key` to hold the string `value`. If `key` already holds a value, it is overwritten,
/// regardless of its kind.
///
/// Ref: <https://redis.io/docs/latest/commands/set/>
#[derive(Debug, PartialEq)]
pub struct Set {
    pub key: String,
    pub value: Bytes,
}

impl Executable for Set {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        engine.set(&self.key, self.value);
        Ok(Reply::ok())
    }
}

impl TryFrom<&mut CommandParser> for Set {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let value = parser.next_bytes()?;

        Ok(Self { key, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;

    #[tokio::test]
    async fn overwrites_any_kind() {
        let engine = Engine::new();
        engine.rpush("key1", vec![Bytes::from("a")]).unwrap();

        let cmd = Command::try_from(vec![
            Bytes::from("SET"),
            Bytes::from("key1"),
            Bytes::from("value"),
        ])
        .unwrap();
        assert_eq!(
            cmd,
            Command::Set(Set {
                key: String::from("key1"),
                value: Bytes::from("value")
            })
        );

        let res = cmd.exec(engine.clone()).await.unwrap();

        assert_eq!(res, Reply::ok());
        assert_eq!(engine.get("key1"), Ok(Some(Bytes::from("value"))));
    }
}
