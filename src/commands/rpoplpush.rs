use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Atomically returns and removes the last element (tail) of the list stored at `source`, and
/// pushes the element at the first element (head) of the list stored at `destination`. If
/// `source` does not exist, `nil` is returned and no operation is performed. If `source` and
/// `destination` are the same, the operation is equivalent to removing the last element from the
/// list and pushing it as first element of the list, so it can be considered as a list rotation
/// command.
///
/// Ref: <https://redis.io/docs/latest/commands/rpoplpush/>
#[derive(Debug, PartialEq)]
pub struct Rpoplpush {
    pub source: String,
    pub destination: String,
}

impl Executable for Rpoplpush {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.rpoplpush(&self.source, &self.destination) {
            Ok(value) => Ok(Reply::optional(value)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Rpoplpush {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let source = parser.next_string()?;
        let destination = parser.next_string()?;

        Ok(Self {
            source,
            destination,
        })
    }
}
