use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Returns the length of the list stored at `key`, 0 when the key does not exist.
///
/// Ref: <https://redis.io/docs/latest/commands/llen/>
#[derive(Debug, PartialEq)]
pub struct Llen {
    pub key: String,
}

impl Executable for Llen {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.llen(&self.key) {
            Ok(len) => Ok(Reply::count(len)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Llen {
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
    async fn length() {
        let engine = Engine::new();
        engine
            .lpush("key1", vec![Bytes::from("a"), Bytes::from("b")])
            .unwrap();

        let cmd = Command::try_from(vec![Bytes::from("LLEN"), Bytes::from("key1")]).unwrap();
        assert_eq!(cmd.exec(engine.clone()).await.unwrap(), Reply::Integer(2));

        let cmd = Command::try_from(vec![Bytes::from("LLEN"), Bytes::from("key2")]).unwrap();
        assert_eq!(cmd.exec(engine).await.unwrap(), Reply::Integer(0));
    }
}
