use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Increments the number stored at `field` in the hash stored at `key` by `increment`. A missing
/// field is set to 0 before the operation is performed.
///
/// Ref: <https://redis.io/docs/latest/commands/hincrby/>
#[derive(Debug, PartialEq)]
pub struct HincrBy {
    pub key: String,
    pub field: Bytes,
    pub increment: i64,
}

impl Executable for HincrBy {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.hincr_by(&self.key, self.field, self.increment) {
            Ok(value) => Ok(Reply::Integer(value)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for HincrBy {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let field = parser.next_bytes()?;
        let increment = parser.next_integer()?;

        Ok(Self {
            key,
            field,
            increment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;

    #[tokio::test]
    async fn increments_field() {
        let engine = Engine::new();
        engine
            .hset("key1", vec![(Bytes::from("field1"), Bytes::from("5"))])
            .unwrap();

        let cmd = Command::try_from(
            ["HINCRBY", "key1", "field1", "-7"]
                .map(Bytes::from)
                .to_vec(),
        )
        .unwrap();
        assert_eq!(
            cmd,
            Command::HincrBy(HincrBy {
                key: String::from("key1"),
                field: Bytes::from("field1"),
                increment: -7,
            })
        );
        assert_eq!(cmd.exec(engine.clone()).await.unwrap(), Reply::Integer(-2));

        let cmd = Command::try_from(
            ["HINCRBY", "key1", "field2", "3"]
                .map(Bytes::from)
                .to_vec(),
        )
        .unwrap();
        assert_eq!(cmd.exec(engine).await.unwrap(), Reply::Integer(3));
    }

    #[tokio::test]
    async fn not_an_integer() {
        let engine = Engine::new();
        engine
            .hset("key1", vec![(Bytes::from("field1"), Bytes::from("abc"))])
            .unwrap();

        let cmd = Command::try_from(
            ["HINCRBY", "key1", "field1", "1"]
                .map(Bytes::from)
                .to_vec(),
        )
        .unwrap();

        assert_eq!(
            cmd.exec(engine).await.unwrap(),
            Reply::Error("ERR value is not an integer or out of range".to_string())
        );
    }
}
