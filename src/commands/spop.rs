use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Removes and returns a random member from the set value stored at `key`.
///
/// Ref: <https://redis.io/docs/latest/commands/spop/>
#[derive(Debug, PartialEq)]
pub struct Spop {
    pub key: String,
}

impl Executable for Spop {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.spop(&self.key) {
            Ok(member) => Ok(Reply::optional(member)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Spop {
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
    async fn pops_every_member_once() {
        let engine = Engine::new();
        engine
            .sadd("key1", ["a", "b"].map(Bytes::from).to_vec())
            .unwrap();

        let mut popped = vec![];
        for _ in 0..3 {
            let cmd = Command::try_from(vec![Bytes::from("SPOP"), Bytes::from("key1")]).unwrap();
            popped.push(cmd.exec(engine.clone()).await.unwrap());
        }

        assert_eq!(popped[2], Reply::Null);
        assert_ne!(popped[0], popped[1]);
        assert_eq!(engine.kind("key1"), None);
    }
}
