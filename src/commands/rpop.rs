use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Removes and returns the last element of the list stored at `key`.
///
/// Ref: <https://redis.io/docs/latest/commands/rpop/>
#[derive(Debug, PartialEq)]
pub struct Rpop {
    pub key: String,
}

impl Executable for Rpop {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.rpop(&self.key) {
            Ok(value) => Ok(Reply::optional(value)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Rpop {
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
    async fn pops_the_tail() {
        let engine = Engine::new();
        engine
            .rpush("key1", vec![Bytes::from("a"), Bytes::from("b")])
            .unwrap();

        let cmd = Command::try_from(vec![Bytes::from("RPOP"), Bytes::from("key1")]).unwrap();
        assert_eq!(
            cmd,
            Command::Rpop(Rpop {
                key: String::from("key1")
            })
        );

        assert_eq!(
            cmd.exec(engine.clone()).await.unwrap(),
            Reply::Bulk(Bytes::from("b"))
        );
        assert_eq!(engine.llen("key1"), Ok(1));
    }
}
