use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Set `key` to hold string `value` if `key` does not exist. When `key` already holds a value,
/// no operation is performed.
///
/// Ref: <https://redis.io/docs/latest/commands/setnx/>
#[derive(Debug, PartialEq)]
pub struct Setnx {
    pub key: String,
    pub value: Bytes,
}

impl Executable for Setnx {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        Ok(Reply::from(engine.set_nx(&self.key, self.value)))
    }
}

impl TryFrom<&mut CommandParser> for Setnx {
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

    fn setnx(value: &'static str) -> Command {
        Command::try_from(vec![
            Bytes::from("SETNX"),
            Bytes::from("key1"),
            Bytes::from(value),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn only_sets_missing_keys() {
        let engine = Engine::new();

        assert_eq!(
            setnx("first").exec(engine.clone()).await.unwrap(),
            Reply::Integer(1)
        );
        assert_eq!(
            setnx("second").exec(engine.clone()).await.unwrap(),
            Reply::Integer(0)
        );
        assert_eq!(engine.get("key1"), Ok(Some(Bytes::from("first"))));
    }
}
