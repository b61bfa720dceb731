use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Returns the specified range of elements in the sorted set stored at `key`, ordered from the
/// lowest to the highest score. `start` and `stop` are 0-based inclusive ranks, negative ones
/// counting from the end. With `WITHSCORES` every member is followed by its score.
///
/// Ref: <https://redis.io/docs/latest/commands/zrange/>
#[derive(Debug, PartialEq)]
pub struct Zrange {
    pub key: String,
    pub start: i64,
    pub stop: i64,
    pub with_scores: bool,
}

impl Executable for Zrange {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        let range = match engine.zrange(&self.key, self.start, self.stop) {
            Ok(range) => range,
            Err(err) => return Ok(err.into()),
        };

        let replies = range
            .into_iter()
            .flat_map(|(member, score)| match self.with_scores {
                true => vec![Reply::Bulk(member), Reply::float(score)],
                false => vec![Reply::Bulk(member)],
            })
            .collect();

        Ok(Reply::Array(replies))
    }
}

impl TryFrom<&mut CommandParser> for Zrange {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let start = parser.next_integer()?;
        let stop = parser.next_integer()?;

        let with_scores = match parser.has_next() {
            true => {
                let option = parser.next_string()?;
                if !option.eq_ignore_ascii_case("withscores") {
                    return Err(CommandParserError::InvalidCommandArgument {
                        command: "zrange".to_string(),
                        argument: option,
                    }
                    .into());
                }
                true
            }
            false => false,
        };

        Ok(Self {
            key,
            start,
            stop,
            with_scores,
        })
    }
}
