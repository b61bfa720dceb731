use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Returns if `member` is a member of the set stored at `key`.
///
/// Ref: <https://redis.io/docs/latest/commands/sismember/>
#[derive(Debug, PartialEq)]
pub struct Sismember {
    pub key: String,
    pub member: Bytes,
}

impl Executable for Sismember {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.sismember(&self.key, &self.member) {
            Ok(found) => Ok(Reply::from(found)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Sismember {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let member = parser.next_bytes()?;

        Ok(Self { key, member })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;

    #[tokio::test]
    async fn membership() {
        let engine = Engine::new();
        engine.sadd("key1", vec![Bytes::from("a")]).unwrap();

        let cmd = Command::try_from(["SISMEMBER", "key1", "a"].map(Bytes::from).to_vec()).unwrap();
        assert_eq!(cmd.exec(engine.clone()).await.unwrap(), Reply::Integer(1));

        let cmd = Command::try_from(["SISMEMBER", "key1", "b"].map(Bytes::from).to_vec()).unwrap();
        assert_eq!(cmd.exec(engine).await.unwrap(), Reply::Integer(0));
    }
}
