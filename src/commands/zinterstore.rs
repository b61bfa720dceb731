use crate::commands::executable::Executable;
use crate::commands::zunionstore::Zunionstore;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::types::Aggregate;
use crate::Error;

/// Computes the intersection of `numkeys` sorted sets given by the specified keys, and stores the
/// result in `destination`. Takes the same `WEIGHTS` and `AGGREGATE` options as `ZUNIONSTORE`.
///
/// Ref: <https://redis.io/docs/latest/commands/zinterstore/>
#[derive(Debug, PartialEq)]
pub struct Zinterstore {
    pub destination: String,
    pub keys: Vec<String>,
    pub weights: Vec<f64>,
    pub aggregate: Aggregate,
}

impl Executable for Zinterstore {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.zinterstore(&self.destination, &self.keys, &self.weights, self.aggregate) {
            Ok(len) => Ok(Reply::count(len)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Zinterstore {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let Zunionstore {
            destination,
            keys,
            weights,
            aggregate,
        } = Zunionstore::try_from(parser)?;

        Ok(Self {
            destination,
            keys,
            weights,
            aggregate,
        })
    }
}
