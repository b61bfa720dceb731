use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Removes the specified members from the sorted set stored at `key`. Non existing members are
/// ignored.
///
/// Ref: <https://redis.io/docs/latest/commands/zrem/>
#[derive(Debug, PartialEq)]
pub struct Zrem {
    pub key: String,
    pub members: Vec<Bytes>,
}

impl Executable for Zrem {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.zrem(&self.key, &self.members) {
            Ok(removed) => Ok(Reply::count(removed)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Zrem {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let members = parser.next_values()?;

        Ok(Self { key, members })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;

    #[tokio::test]
    async fn removes_members() {
        let engine = Engine::new();
        engine
            .zadd("key1", vec![(Bytes::from("a"), 1.0), (Bytes::from("b"), 2.0)])
            .unwrap();

        let cmd = Command::try_from(["ZREM", "key1", "a", "c"].map(Bytes::from).to_vec()).unwrap();
        assert_eq!(cmd.exec(engine.clone()).await.unwrap(), Reply::Integer(1));

        let cmd = Command::try_from(["ZREM", "key1", "b"].map(Bytes::from).to_vec()).unwrap();
        assert_eq!(cmd.exec(engine.clone()).await.unwrap(), Reply::Integer(1));
        assert_eq!(engine.kind("key1"), None);
    }
}
