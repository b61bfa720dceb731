use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Returns the values of all specified keys. For every key that does not hold a string value or
/// does not exist, the special value `nil` is returned. Because of this, the operation never
/// fails.
///
/// Ref: <https://redis.io/docs/latest/commands/mget/>
#[derive(Debug, PartialEq)]
pub struct Mget {
    pub keys: Vec<String>,
}

impl Executable for Mget {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        let values = engine
            .mget(&self.keys)
            .into_iter()
            .map(Reply::optional)
            .collect();

        Ok(Reply::Array(values))
    }
}

impl TryFrom<&mut CommandParser> for Mget {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let keys = parser.next_keys()?;
        Ok(Self { keys })
    }
}
