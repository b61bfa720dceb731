use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Returns the string representation of the kind of value stored at key: `string`, `list`,
/// `set`, `zset` or `hash`. A missing key is reported as `none`.
///
/// Ref: <https://redis.io/docs/latest/commands/type/>
#[derive(Debug, PartialEq)]
pub struct Type {
    pub key: String,
}

impl Executable for Type {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        let kind = engine
            .kind(&self.key)
            .map_or("none".to_string(), |kind| kind.to_string());

        Ok(Reply::Simple(kind))
    }
}

impl TryFrom<&mut CommandParser> for Type {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        Ok(Self { key })
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use crate::commands::Command;

    use super::*;

    async fn type_of(engine: &Engine, key: &'static str) -> Reply {
        let cmd = Command::try_from(vec![Bytes::from("TYPE"), Bytes::from(key)]).unwrap();
        cmd.exec(engine.clone()).await.unwrap()
    }

    #[tokio::test]
    async fn every_kind() {
        let engine = Engine::new();
        engine.set("string", Bytes::from("value"));
        engine.rpush("list", vec![Bytes::from("a")]).unwrap();
        engine.sadd("set", vec![Bytes::from("a")]).unwrap();
        engine.zadd("zset", vec![(Bytes::from("a"), 1.0)]).unwrap();
        engine
            .hset("hash", vec![(Bytes::from("f"), Bytes::from("v"))])
            .unwrap();

        for key in ["string", "list", "set", "zset", "hash"] {
            assert_eq!(type_of(&engine, key).await, Reply::Simple(key.to_string()));
        }
        assert_eq!(
            type_of(&engine, "missing").await,
            Reply::Simple("none".to_string())
        );
    }
}
