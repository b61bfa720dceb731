use itertools::Itertools;

use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Returns the members of the set resulting from the union of all the given sets.
///
/// Ref: <https://redis.io/docs/latest/commands/sunion/>
#[derive(Debug, PartialEq)]
pub struct Sunion {
    pub keys: Vec<String>,
}

impl Executable for Sunion {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.sunion(&self.keys) {
            Ok(members) => Ok(Reply::bulks(members.into_iter().sorted())),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Sunion {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let keys = parser.next_keys()?;
        Ok(Self { keys })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use bytes::Bytes;

    #[tokio::test]
    async fn union() {
        let engine = Engine::new();
        engine
            .sadd("key1", ["a", "b"].map(Bytes::from).to_vec())
            .unwrap();
        engine
            .sadd("key2", ["b", "c"].map(Bytes::from).to_vec())
            .unwrap();

        let cmd = Command::try_from(
            ["SUNION", "key1", "key2", "missing"]
                .map(Bytes::from)
                .to_vec(),
        )
        .unwrap();

        assert_eq!(
            cmd.exec(engine).await.unwrap(),
            Reply::bulks(["a", "b", "c"].map(Bytes::from))
        );
    }

    #[tokio::test]
    async fn wrong_kind() {
        let engine = Engine::new();
        engine.set("key1", Bytes::from("value"));

        let cmd = Command::try_from(["SUNION", "key1"].map(Bytes::from).to_vec()).unwrap();

        assert!(matches!(cmd.exec(engine).await.unwrap(), Reply::Error(_)));
    }
}
