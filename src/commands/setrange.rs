use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// Overwrites part of the string stored at `key`, starting at the specified offset, for the entire
/// length of `value`. If the offset is larger than the current length of the string at `key`, the
/// string is padded with zero bytes to make offset fit.
///
/// Ref: <https://redis.io/docs/latest/commands/setrange/>
#[derive(Debug, PartialEq)]
pub struct Setrange {
    pub key: String,
    pub offset: usize,
    pub value: Bytes,
}

impl Executable for Setrange {
    fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match engine.set_range(&self.key, self.offset, &self.value) {
            Ok(len) => Ok(Reply::count(len)),
            Err(err) => Ok(err.into()),
        }
    }
}

impl TryFrom<&mut CommandParser> for Setrange {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_string()?;
        let offset = parser.next_integer()?;
        let offset = usize::try_from(offset).map_err(|_| CommandParserError::InvalidArgument {
            expected: "non negative offset".to_string(),
            actual: offset.to_string(),
        })?;
        let value = parser.next_bytes()?;

        Ok(Self { key, offset, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;

    #[tokio::test]
    async fn overwrite() {
        let engine = Engine::new();
        engine.set("key1", Bytes::from("Hello World"));

        let cmd = Command::try_from(["SETRANGE", "key1", "6", "Redis"].map(Bytes::from).to_vec())
            .unwrap();
        assert_eq!(
            cmd,
            Command::Setrange(Setrange {
                key: String::from("key1"),
                offset: 6,
                value: Bytes::from("Redis"),
            })
        );

        assert_eq!(cmd.exec(engine.clone()).await.unwrap(), Reply::Integer(11));
        assert_eq!(engine.get("key1"), Ok(Some(Bytes::from("Hello Redis"))));
    }

    #[tokio::test]
    async fn zero_padding() {
        let engine = Engine::new();

        let cmd = Command::try_from(["SETRANGE", "key1", "3", "abc"].map(Bytes::from).to_vec())
            .unwrap();

        assert_eq!(cmd.exec(engine.clone()).await.unwrap(), Reply::Integer(6));
        assert_eq!(
            engine.get("key1"),
            Ok(Some(Bytes::from_static(b"\0\0\0abc")))
        );
    }

    #[test]
    fn negative_offset() {
        let err = Command::try_from(["SETRANGE", "key1", "-1", "abc"].map(Bytes::from).to_vec())
            .err()
            .unwrap();
        let err = err.downcast_ref::<CommandParserError>().unwrap();

        assert_eq!(
            *err,
            CommandParserError::InvalidArgument {
                expected: "non negative offset".to_string(),
                actual: "-1".to_string(),
            }
        );
    }
}
