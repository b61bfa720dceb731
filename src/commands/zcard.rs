use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Returns the sorted set cardinality (number of elements) of the sorted set stored at `key`.
///
/// Ref: <https://redis.io/docs/latest/commands/zcard/>
#[derive(Debug, PartialEq)]
pub struct Zcard {
    pub key: String,
}

impl Executable for Zcard {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.zcard(&self.key) {
            Ok(len) => Ok(Reply::count(len)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Zcard {
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
    async fn cardinality() {
        let engine = Engine::new();
        engine
            .zadd("key1", vec![(Bytes::from("a"), 1.0), (Bytes::from("b"), 1.0)])
            .unwrap();

        let cmd = Command::try_from(vec![Bytes::from("ZCARD"), Bytes::from("key1")]).unwrap();
        assert_eq!(cmd.exec(engine.clone()).await.unwrap(), Reply::Integer(2));

        let cmd = Command::try_from(vec![Bytes::from("ZCARD"), Bytes::from("key2")]).unwrap();
        assert_eq!(cmd.exec(engine).await.unwrap(), Reply::Integer(0));
    }
}
