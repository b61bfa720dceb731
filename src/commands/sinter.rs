use itertools::Itertools;

use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Returns the members of the set resulting from the intersection of all the given sets. Keys that
/// do not exist are considered to be empty sets, so one missing key empties the result.
///
/// Ref: <https://redis.io/docs/latest/commands/sinter/>
#[derive(Debug, PartialEq)]
pub struct Sinter {
    pub keys: Vec<String>,
}

impl Executable for Sinter {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.sinter(&self.keys) {
            Ok(members) => Ok(Reply::bulks(members.into_iter().sorted())),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Sinter {
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
    async fn intersection() {
        let engine = Engine::new();
        engine
            .sadd("key1", ["a", "b", "c"].map(Bytes::from).to_vec())
            .unwrap();
        engine
            .sadd("key2", ["c", "d", "a"].map(Bytes::from).to_vec())
            .unwrap();

        let cmd = Command::try_from(["SINTER", "key1", "key2"].map(Bytes::from).to_vec()).unwrap();
        assert_eq!(
            cmd.exec(engine.clone()).await.unwrap(),
            Reply::bulks(["a", "c"].map(Bytes::from))
        );

        let cmd = Command::try_from(["SINTER", "key1", "missing"].map(Bytes::from).to_vec())
            .unwrap();
        assert_eq!(cmd.exec(engine).await.unwrap(), Reply::Array(vec![]));
    }
}
