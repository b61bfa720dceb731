use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Sets the specified fields to their respective values in the hash stored at `key`.
///
/// Ref: <https://redis.io/docs/latest/commands/hmset/>
#[derive(Debug, PartialEq)]
pub struct Hmset {
    pub key: String,
    pub pairs: Vec<(Bytes, Bytes)>,
}

impl Executable for Hmset {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.hset(&self.key, self.pairs) {
            Ok(_) => Ok(Reply::ok()),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Hmset {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let pairs = parser.next_pairs()?;

        Ok(Self { key, pairs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;

    #[tokio::test]
    async fn replies_ok() {
        let engine = Engine::new();

        let cmd = Command::try_from(
            ["HMSET", "key1", "field1", "a", "field2", "b"]
                .map(Bytes::from)
                .to_vec(),
        )
        .unwrap();

        assert_eq!(cmd.exec(engine.clone()).await.unwrap(), Reply::ok());
        assert_eq!(engine.hlen("key1"), Ok(2));
    }
}
