use itertools::Itertools;

use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Returns all values in the hash stored at `key`, sorted.
///
/// Ref: <https://redis.io/docs/latest/commands/hvals/>
#[derive(Debug, PartialEq)]
pub struct Hvals {
    pub key: String,
}

impl Executable for Hvals {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.hvals(&self.key) {
            Ok(values) => Ok(Reply::bulks(values.into_iter().sorted())),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Hvals {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        Ok(Self { key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use bytes::Bytes;

    #[tokio::test]
    async fn values() {
        let engine = Engine::new();
        engine
            .hset(
                "key1",
                vec![
                    (Bytes::from("field1"), Bytes::from("b")),
                    (Bytes::from("field2"), Bytes::from("a")),
                ],
            )
            .unwrap();

        let cmd = Command::try_from(vec![Bytes::from("HVALS"), Bytes::from("key1")]).unwrap();
        assert_eq!(
            cmd.exec(engine).await.unwrap(),
            Reply::bulks(["a", "b"].map(Bytes::from))
        );
    }
}
