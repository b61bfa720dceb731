use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Increment the string representing a floating point number stored at key by the specified
/// increment. By using a negative increment value, the result is that the value stored at the key
/// is decremented (by the obvious properties of addition). If the key does not exist, it is set to
/// 0 before performing the operation.
///
/// Ref: <https://redis.io/docs/latest/commands/incrbyfloat/>
#[derive(Debug, PartialEq)]
pub struct IncrByFloat {
    pub key: String,
    pub increment: f64,
}

impl Executable for IncrByFloat {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.incr_by_float(&self.key, self.increment) {
            Ok(value) => Ok(Reply::float(value)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for IncrByFloat {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let increment = parser.next_float()?;

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

        let cmd =
            Command::try_from(["INCRBYFLOAT", "key1", "0.5"].map(Bytes::from).to_vec()).unwrap();
        assert_eq!(
            cmd,
            Command::IncrByFloat(IncrByFloat {
                key: "key1".to_string(),
                increment: 0.5,
            })
        );

        engine.set("key1", Bytes::from("10.25"));

        let result = cmd.exec(engine.clone()).await.unwrap();

        assert_eq!(result, Reply::Bulk(Bytes::from("10.75")));
        assert_eq!(engine.get("key1"), Ok(Some(Bytes::from("10.75"))));
    }

    #[tokio::test]
    async fn non_existing_key() {
        let engine = Engine::new();

        let cmd =
            Command::try_from(["INCRBYFLOAT", "key1", "10"].map(Bytes::from).to_vec()).unwrap();
        let result = cmd.exec(engine.clone()).await.unwrap();

        assert_eq!(result, Reply::Bulk(Bytes::from("10")));
        assert_eq!(engine.get("key1"), Ok(Some(Bytes::from("10"))));
    }

    #[tokio::test]
    async fn invalid_value() {
        let engine = Engine::new();
        engine.set("key1", Bytes::from("value"));

        let cmd =
            Command::try_from(["INCRBYFLOAT", "key1", "10"].map(Bytes::from).to_vec()).unwrap();
        let result = cmd.exec(engine.clone()).await.unwrap();

        assert_eq!(
            result,
            Reply::Error("ERR value is not a valid float".to_string())
        );
        assert_eq!(engine.get("key1"), Ok(Some(Bytes::from("value"))));
    }
}
