use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Returns if `field` is an existing field in the hash stored at `key`.
///
/// Ref: <https://redis.io/docs/latest/commands/hexists/>
#[derive(Debug, PartialEq)]
pub struct Hexists {
    pub key: String,
    pub field: Bytes,
}

impl Executable for Hexists {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.hexists(&self.key, &self.field) {
            Ok(found) => Ok(Reply::from(found)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Hexists {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let field = parser.next_bytes()?;

        Ok(Self { key, field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;

    #[tokio::test]
    async fn field_exists() {
        let engine = Engine::new();
        engine
            .hset("key1", vec![(Bytes::from("field1"), Bytes::from("a"))])
            .unwrap();

        let cmd = Command::try_from(["HEXISTS", "key1", "field1"].map(Bytes::from).to_vec())
            .unwrap();
        assert_eq!(cmd.exec(engine.clone()).await.unwrap(), Reply::Integer(1));

        let cmd = Command::try_from(["HEXISTS", "key1", "field2"].map(Bytes::from).to_vec())
            .unwrap();
        assert_eq!(cmd.exec(engine).await.unwrap(), Reply::Integer(0));
    }
}
