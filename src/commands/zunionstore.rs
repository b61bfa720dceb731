use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::engine::Engine;
use crate::reply::Reply;
use crate::types::Aggregate;
use crate::Error;

/// Computes the union of `numkeys` sorted sets given by the specified keys, and stores the result
/// in `destination`. Plain sets are accepted as inputs, their members scoring 0.
///
/// `WEIGHTS` gives a multiplication factor for the scores of each input, 1 by default.
/// `AGGREGATE` picks how the scores of a member present in several inputs are combined, `SUM` by
/// default.
///
/// Ref: <https://redis.io/docs/latest/commands/zunionstore/>
#[derive(Debug, PartialEq)]
pub struct Zunionstore {
    pub destination: String,
    pub keys: Vec<String>,
    pub weights: Vec<f64>,
    pub aggregate: Aggregate,
}

impl Executable for Zunionstore {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.zunionstore(&self.destination, &self.keys, &self.weights, self.aggregate) {
            Ok(len) => Ok(Reply::count(len)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Zunionstore {
    type Error = Error;

    /// `destination numkeys key [key ...] [WEIGHTS weight [weight ...]] [AGGREGATE SUM|MIN|MAX]`
    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let destination = parser.next_string()?;

        let numkeys = parser.next_integer()?;
        if numkeys < 1 {
            return Err(CommandParserError::InvalidArgument {
                expected: "at least 1 input key".to_string(),
                actual: numkeys.to_string(),
            }
            .into());
        }

        let keys = (0..numkeys)
            .map(|_| parser.next_string())
            .collect::<Result<Vec<_>, _>>()?;

        let mut weights = vec![];
        let mut aggregate = Aggregate::default();

        while parser.has_next() {
            let option = parser.next_string()?;

            match option.to_lowercase().as_str() {
                "weights" => {
                    weights = keys
                        .iter()
                        .map(|_| parser.next_float())
                        .collect::<Result<Vec<_>, _>>()?;
                }
                "aggregate" => {
                    aggregate = parser.next_parsed("SUM, MIN or MAX")?;
                }
                _ => {
                    return Err(CommandParserError::InvalidArgument {
                        expected: "WEIGHTS or AGGREGATE".to_string(),
                        actual: option,
                    }
                    .into())
                }
            }
        }

        Ok(Self {
            destination,
            keys,
            weights,
            aggregate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use bytes::Bytes;

    fn engine() -> Engine {
        let engine = Engine::new();
        engine
            .zadd("zset1", vec![(Bytes::from("a"), 1.0), (Bytes::from("b"), 2.0)])
            .unwrap();
        engine
            .zadd("zset2", vec![(Bytes::from("b"), 3.0), (Bytes::from("c"), 4.0)])
            .unwrap();
        engine
    }

    #[tokio::test]
    async fn sums_by_default() {
        let engine = engine();

        let cmd = Command::try_from(
            ["ZUNIONSTORE", "out", "2", "zset1", "zset2"]
                .map(Bytes::from)
                .to_vec(),
        )
        .unwrap();
        assert_eq!(
            cmd,
            Command::Zunionstore(Zunionstore {
                destination: String::from("out"),
                keys: vec![String::from("zset1"), String::from("zset2")],
                weights: vec![],
                aggregate: Aggregate::Sum,
            })
        );

        assert_eq!(cmd.exec(engine.clone()).await.unwrap(), Reply::Integer(3));
        assert_eq!(
            engine.zrange("out", 0, -1),
            Ok(vec![
                (Bytes::from("a"), 1.0),
                (Bytes::from("c"), 4.0),
                (Bytes::from("b"), 5.0),
            ])
        );
    }

    #[tokio::test]
    async fn weights_and_aggregate() {
        let engine = engine();

        let cmd = Command::try_from(
            [
                "ZUNIONSTORE",
                "out",
                "2",
                "zset1",
                "zset2",
                "WEIGHTS",
                "2",
                "1",
                "aggregate",
                "max",
            ]
            .map(Bytes::from)
            .to_vec(),
        )
        .unwrap();

        assert_eq!(cmd.exec(engine.clone()).await.unwrap(), Reply::Integer(3));
        assert_eq!(engine.zscore("out", &Bytes::from("a")), Ok(Some(2.0)));
        assert_eq!(engine.zscore("out", &Bytes::from("b")), Ok(Some(4.0)));
    }

    #[tokio::test]
    async fn missing_weights() {
        let res = Command::try_from(
            ["ZUNIONSTORE", "out", "2", "zset1", "zset2", "WEIGHTS", "2"]
                .map(Bytes::from)
                .to_vec(),
        );

        assert!(res.is_err());
    }

    #[tokio::test]
    async fn invalid_numkeys() {
        let res = Command::try_from(
            ["ZUNIONSTORE", "out", "0", "zset1"]
                .map(Bytes::from)
                .to_vec(),
        );

        assert!(res.is_err());
    }

    #[tokio::test]
    async fn unknown_aggregate() {
        let res = Command::try_from(
            ["ZUNIONSTORE", "out", "1", "zset1", "AGGREGATE", "AVG"]
                .map(Bytes::from)
                .to_vec(),
        );

        assert!(res.is_err());
    }
}
