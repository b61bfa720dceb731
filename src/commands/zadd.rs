use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Adds all the specified members with the specified scores to the sorted set stored at `key`. If
/// a specified member is already a member of the sorted set, the score is updated and the element
/// reinserted at the right position to ensure the correct ordering.
///
/// Ref: <https://redis.io/docs/latest/commands/zadd/>
#[derive(Debug, PartialEq)]
pub struct Zadd {
    pub key: String,
    pub members: Vec<(Bytes, f64)>,
}

impl Executable for Zadd {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.zadd(&self.key, self.members) {
            Ok(added) => Ok(Reply::count(added)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Zadd {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;

        let mut members = vec![];
        loop {
            let score = match parser.next_float() {
                Ok(score) => score,
                Err(CommandParserError::EndOfStream) if !members.is_empty() => break,
                Err(err) => return Err(err.into()),
            };
            members.push((parser.next_bytes()?, score));
        }

        Ok(Self { key, members })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;

    #[tokio::test]
    async fn adds_and_updates() {
        let engine = Engine::new();

        let cmd = Command::try_from(
            ["ZADD", "key1", "1", "a", "2", "b"]
                .map(Bytes::from)
                .to_vec(),
        )
        .unwrap();
        assert_eq!(
            cmd,
            Command::Zadd(Zadd {
                key: String::from("key1"),
                members: vec![(Bytes::from("a"), 1.0), (Bytes::from("b"), 2.0)],
            })
        );
        assert_eq!(cmd.exec(engine.clone()).await.unwrap(), Reply::Integer(2));

        let cmd = Command::try_from(
            ["ZADD", "key1", "5", "a", "3", "c"]
                .map(Bytes::from)
                .to_vec(),
        )
        .unwrap();
        assert_eq!(cmd.exec(engine.clone()).await.unwrap(), Reply::Integer(1));
        assert_eq!(engine.zscore("key1", &Bytes::from("a")), Ok(Some(5.0)));
    }

    #[tokio::test]
    async fn dangling_score() {
        let res = Command::try_from(
            ["ZADD", "key1", "1", "a", "2"]
                .map(Bytes::from)
                .to_vec(),
        );

        assert!(res.is_err());
    }

    #[tokio::test]
    async fn nan_score() {
        let res = Command::try_from(["ZADD", "key1", "nan", "a"].map(Bytes::from).to_vec());

        assert!(res.is_err());
    }
}
