use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Increments the number stored at `key` by `increment`. If the key does not exist, it is set to 0
/// before performing the operation.
///
/// Ref: <https://redis.io/docs/latest/commands/incrby/>
#[derive(Debug, PartialEq)]
pub struct IncrBy {
    pub key: String,
    pub increment: i64,
}

impl Executable for IncrBy {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.incr_by(&self.key, self.increment) {
            Ok(value) => Ok(Reply::Integer(value)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for IncrBy {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let increment = parser.next_integer()?;

        Ok(Self { key, increment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use bytes::Bytes;

    #[tokio::test]
    async fn existing_key() {
        let engine = Engine::new();
        engine.set("key1", Bytes::from("10"));

        let cmd = Command::try_from(["INCRBY", "key1", "5"].map(Bytes::from).to_vec()).unwrap();
        assert_eq!(
            cmd,
            Command::IncrBy(IncrBy {
                key: String::from("key1"),
                increment: 5,
            })
        );

        assert_eq!(cmd.exec(engine.clone()).await.unwrap(), Reply::Integer(15));
        assert_eq!(engine.get("key1"), Ok(Some(Bytes::from("15"))));
    }
}
