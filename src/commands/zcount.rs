use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Returns the number of elements in the sorted set at `key` with a score between `min` and `max`,
/// both inclusive. `-inf` and `+inf` are valid bounds.
///
/// Ref: <https://redis.io/docs/latest/commands/zcount/>
#[derive(Debug, PartialEq)]
pub struct Zcount {
    pub key: String,
    pub min: f64,
    pub max: f64,
}

impl Executable for Zcount {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.zcount(&self.key, self.min, self.max) {
            Ok(count) => Ok(Reply::count(count)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Zcount {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let min = parser.next_float()?;
        let max = parser.next_float()?;

        Ok(Self { key, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use bytes::Bytes;

    #[tokio::test]
    async fn inclusive_bounds() {
        let engine = Engine::new();
        engine
            .zadd(
                "key1",
                vec![
                    (Bytes::from("a"), 1.0),
                    (Bytes::from("b"), 2.0),
                    (Bytes::from("c"), 6.0),
                ],
            )
            .unwrap();

        let cmd = Command::try_from(["ZCOUNT", "key1", "0", "3"].map(Bytes::from).to_vec())
            .unwrap();
        assert_eq!(cmd.exec(engine.clone()).await.unwrap(), Reply::Integer(2));

        let cmd = Command::try_from(["ZCOUNT", "key1", "2", "6"].map(Bytes::from).to_vec())
            .unwrap();
        assert_eq!(cmd.exec(engine.clone()).await.unwrap(), Reply::Integer(2));

        let cmd = Command::try_from(
            ["ZCOUNT", "key1", "-inf", "+inf"]
                .map(Bytes::from)
                .to_vec(),
        )
        .unwrap();
        assert_eq!(cmd.exec(engine).await.unwrap(), Reply::Integer(3));
    }
}
