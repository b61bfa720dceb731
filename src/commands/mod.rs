pub mod append;
pub mod blpop;
pub mod brpop;
pub mod brpoplpush;
pub mod dbsize;
pub mod decr;
pub mod decrby;
pub mod del;
pub mod executable;
pub mod exists;
pub mod get;
pub mod getbit;
pub mod getdel;
pub mod getrange;
pub mod hdel;
pub mod hexists;
pub mod hget;
pub mod hgetall;
pub mod hincrby;
pub mod hincrbyfloat;
pub mod hkeys;
pub mod hlen;
pub mod hmget;
pub mod hmset;
pub mod hset;
pub mod hvals;
pub mod incr;
pub mod incrby;
pub mod incrbyfloat;
pub mod keys;
pub mod lindex;
pub mod llen;
pub mod lpop;
pub mod lpush;
pub mod lrange;
pub mod ltrim;
pub mod mget;
pub mod mset;
pub mod ping;
pub mod rpop;
pub mod rpoplpush;
pub mod rpush;
pub mod sadd;
pub mod scard;
pub mod sdiff;
pub mod set;
pub mod setbit;
pub mod setnx;
pub mod setrange;
pub mod sinter;
pub mod sismember;
pub mod smembers;
pub mod smove;
pub mod spop;
pub mod srem;
pub mod strlen;
pub mod sunion;
pub mod type_;
pub mod zadd;
pub mod zcard;
pub mod zcount;
pub mod zincrby;
pub mod zinterstore;
pub mod zrange;
pub mod zrank;
pub mod zrem;
pub mod zscore;
pub mod zunionstore;

use bytes::Bytes;
use std::time::Duration;
use std::{str, vec};
use thiserror::Error as ThisError;

use crate::commands::executable::Executable;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

use append::Append;
use blpop::Blpop;
use brpop::Brpop;
use brpoplpush::Brpoplpush;
use dbsize::DBSize;
use decr::Decr;
use decrby::DecrBy;
use del::Del;
use exists::Exists;
use get::Get;
use getbit::Getbit;
use getdel::Getdel;
use getrange::Getrange;
use hdel::Hdel;
use hexists::Hexists;
use hget::Hget;
use hgetall::Hgetall;
use hincrby::HincrBy;
use hincrbyfloat::HincrByFloat;
use hkeys::Hkeys;
use hlen::Hlen;
use hmget::Hmget;
use hmset::Hmset;
use hset::Hset;
use hvals::Hvals;
use incr::Incr;
use incrby::IncrBy;
use incrbyfloat::IncrByFloat;
use keys::Keys;
use lindex::Lindex;
use llen::Llen;
use lpop::Lpop;
use lpush::Lpush;
use lrange::Lrange;
use ltrim::Ltrim;
use mget::Mget;
use mset::Mset;
use ping::Ping;
use rpop::Rpop;
use rpoplpush::Rpoplpush;
use rpush::Rpush;
use sadd::Sadd;
use scard::Scard;
use sdiff::Sdiff;
use set::Set;
use setbit::Setbit;
use setnx::Setnx;
use setrange::Setrange;
use sinter::Sinter;
use sismember::Sismember;
use smembers::Smembers;
use smove::Smove;
use spop::Spop;
use srem::Srem;
use strlen::Strlen;
use sunion::Sunion;
use type_::Type;
use zadd::Zadd;
use zcard::Zcard;
use zcount::Zcount;
use zincrby::ZincrBy;
use zinterstore::Zinterstore;
use zrange::Zrange;
use zrank::Zrank;
use zrem::Zrem;
use zscore::Zscore;
use zunionstore::Zunionstore;

#[derive(Debug, PartialEq)]
pub enum Command {
    DBSize(DBSize),
    Del(Del),
    Exists(Exists),
    Keys(Keys),
    Ping(Ping),
    Type(Type),

    Append(Append),
    Decr(Decr),
    DecrBy(DecrBy),
    Get(Get),
    Getbit(Getbit),
    Getdel(Getdel),
    Getrange(Getrange),
    Incr(Incr),
    IncrBy(IncrBy),
    IncrByFloat(IncrByFloat),
    Mget(Mget),
    Mset(Mset),
    Set(Set),
    Setbit(Setbit),
    Setnx(Setnx),
    Setrange(Setrange),
    Strlen(Strlen),

    Blpop(Blpop),
    Brpop(Brpop),
    Brpoplpush(Brpoplpush),
    Lindex(Lindex),
    Llen(Llen),
    Lpop(Lpop),
    Lpush(Lpush),
    Lrange(Lrange),
    Ltrim(Ltrim),
    Rpop(Rpop),
    Rpoplpush(Rpoplpush),
    Rpush(Rpush),

    Sadd(Sadd),
    Scard(Scard),
    Sdiff(Sdiff),
    Sinter(Sinter),
    Sismember(Sismember),
    Smembers(Smembers),
    Smove(Smove),
    Spop(Spop),
    Srem(Srem),
    Sunion(Sunion),

    Zadd(Zadd),
    Zcard(Zcard),
    Zcount(Zcount),
    ZincrBy(ZincrBy),
    Zinterstore(Zinterstore),
    Zrange(Zrange),
    Zrank(Zrank),
    Zrem(Zrem),
    Zscore(Zscore),
    Zunionstore(Zunionstore),

    Hdel(Hdel),
    Hexists(Hexists),
    Hget(Hget),
    Hgetall(Hgetall),
    HincrBy(HincrBy),
    HincrByFloat(HincrByFloat),
    Hkeys(Hkeys),
    Hlen(Hlen),
    Hmget(Hmget),
    Hmset(Hmset),
    Hset(Hset),
    Hvals(Hvals),
}

impl Command {
    /// Executes the command. Only the blocking list commands ever wait.
    pub async fn exec(self, engine: Engine) -> Result<Reply, Error> {
        match self {
            Command::Blpop(cmd) => cmd.exec(engine).await,
            Command::Brpop(cmd) => cmd.exec(engine).await,
            Command::Brpoplpush(cmd) => cmd.exec(engine).await,

            Command::Append(cmd) => cmd.exec(engine),
            Command::DBSize(cmd) => cmd.exec(engine),
            Command::Decr(cmd) => cmd.exec(engine),
            Command::DecrBy(cmd) => cmd.exec(engine),
            Command::Del(cmd) => cmd.exec(engine),
            Command::Exists(cmd) => cmd.exec(engine),
            Command::Get(cmd) => cmd.exec(engine),
            Command::Getbit(cmd) => cmd.exec(engine),
            Command::Getdel(cmd) => cmd.exec(engine),
            Command::Getrange(cmd) => cmd.exec(engine),
            Command::Hdel(cmd) => cmd.exec(engine),
            Command::Hexists(cmd) => cmd.exec(engine),
            Command::Hget(cmd) => cmd.exec(engine),
            Command::Hgetall(cmd) => cmd.exec(engine),
            Command::HincrBy(cmd) => cmd.exec(engine),
            Command::HincrByFloat(cmd) => cmd.exec(engine),
            Command::Hkeys(cmd) => cmd.exec(engine),
            Command::Hlen(cmd) => cmd.exec(engine),
            Command::Hmget(cmd) => cmd.exec(engine),
            Command::Hmset(cmd) => cmd.exec(engine),
            Command::Hset(cmd) => cmd.exec(engine),
            Command::Hvals(cmd) => cmd.exec(engine),
            Command::Incr(cmd) => cmd.exec(engine),
            Command::IncrBy(cmd) => cmd.exec(engine),
            Command::IncrByFloat(cmd) => cmd.exec(engine),
            Command::Keys(cmd) => cmd.exec(engine),
            Command::Lindex(cmd) => cmd.exec(engine),
            Command::Llen(cmd) => cmd.exec(engine),
            Command::Lpop(cmd) => cmd.exec(engine),
            Command::Lpush(cmd) => cmd.exec(engine),
            Command::Lrange(cmd) => cmd.exec(engine),
            Command::Ltrim(cmd) => cmd.exec(engine),
            Command::Mget(cmd) => cmd.exec(engine),
            Command::Mset(cmd) => cmd.exec(engine),
            Command::Ping(cmd) => cmd.exec(engine),
            Command::Rpop(cmd) => cmd.exec(engine),
            Command::Rpoplpush(cmd) => cmd.exec(engine),
            Command::Rpush(cmd) => cmd.exec(engine),
            Command::Sadd(cmd) => cmd.exec(engine),
            Command::Scard(cmd) => cmd.exec(engine),
            Command::Sdiff(cmd) => cmd.exec(engine),
            Command::Set(cmd) => cmd.exec(engine),
            Command::Setbit(cmd) => cmd.exec(engine),
            Command::Setnx(cmd) => cmd.exec(engine),
            Command::Setrange(cmd) => cmd.exec(engine),
            Command::Sinter(cmd) => cmd.exec(engine),
            Command::Sismember(cmd) => cmd.exec(engine),
            Command::Smembers(cmd) => cmd.exec(engine),
            Command::Smove(cmd) => cmd.exec(engine),
            Command::Spop(cmd) => cmd.exec(engine),
            Command::Srem(cmd) => cmd.exec(engine),
            Command::Strlen(cmd) => cmd.exec(engine),
            Command::Sunion(cmd) => cmd.exec(engine),
            Command::Type(cmd) => cmd.exec(engine),
            Command::Zadd(cmd) => cmd.exec(engine),
            Command::Zcard(cmd) => cmd.exec(engine),
            Command::Zcount(cmd) => cmd.exec(engine),
            Command::ZincrBy(cmd) => cmd.exec(engine),
            Command::Zinterstore(cmd) => cmd.exec(engine),
            Command::Zrange(cmd) => cmd.exec(engine),
            Command::Zrank(cmd) => cmd.exec(engine),
            Command::Zrem(cmd) => cmd.exec(engine),
            Command::Zscore(cmd) => cmd.exec(engine),
            Command::Zunionstore(cmd) => cmd.exec(engine),
        }
    }
}

impl TryFrom<Vec<Bytes>> for Command {
    type Error = Error;

    /// Parses a command from its arguments, the first one being the command name.
    fn try_from(args: Vec<Bytes>) -> Result<Self, Self::Error> {
        let mut parser = CommandParser {
            parts: args.into_iter(),
        };

        let command_name = parser.parse_command_name()?;

        let command = match &command_name[..] {
            "append" => Append::try_from(&mut parser).map(Command::Append),
            "blpop" => Blpop::try_from(&mut parser).map(Command::Blpop),
            "brpop" => Brpop::try_from(&mut parser).map(Command::Brpop),
            "brpoplpush" => Brpoplpush::try_from(&mut parser).map(Command::Brpoplpush),
            "dbsize" => DBSize::try_from(&mut parser).map(Command::DBSize),
            "decr" => Decr::try_from(&mut parser).map(Command::Decr),
            "decrby" => DecrBy::try_from(&mut parser).map(Command::DecrBy),
            "del" => Del::try_from(&mut parser).map(Command::Del),
            "exists" => Exists::try_from(&mut parser).map(Command::Exists),
            "get" => Get::try_from(&mut parser).map(Command::Get),
            "getbit" => Getbit::try_from(&mut parser).map(Command::Getbit),
            "getdel" => Getdel::try_from(&mut parser).map(Command::Getdel),
            "getrange" => Getrange::try_from(&mut parser).map(Command::Getrange),
            "hdel" => Hdel::try_from(&mut parser).map(Command::Hdel),
            "hexists" => Hexists::try_from(&mut parser).map(Command::Hexists),
            "hget" => Hget::try_from(&mut parser).map(Command::Hget),
            "hgetall" => Hgetall::try_from(&mut parser).map(Command::Hgetall),
            "hincrby" => HincrBy::try_from(&mut parser).map(Command::HincrBy),
            "hincrbyfloat" => HincrByFloat::try_from(&mut parser).map(Command::HincrByFloat),
            "hkeys" => Hkeys::try_from(&mut parser).map(Command::Hkeys),
            "hlen" => Hlen::try_from(&mut parser).map(Command::Hlen),
            "hmget" => Hmget::try_from(&mut parser).map(Command::Hmget),
            "hmset" => Hmset::try_from(&mut parser).map(Command::Hmset),
            "hset" => Hset::try_from(&mut parser).map(Command::Hset),
            "hvals" => Hvals::try_from(&mut parser).map(Command::Hvals),
            "incr" => Incr::try_from(&mut parser).map(Command::Incr),
            "incrby" => IncrBy::try_from(&mut parser).map(Command::IncrBy),
            "incrbyfloat" => IncrByFloat::try_from(&mut parser).map(Command::IncrByFloat),
            "keys" => Keys::try_from(&mut parser).map(Command::Keys),
            "lindex" => Lindex::try_from(&mut parser).map(Command::Lindex),
            "llen" => Llen::try_from(&mut parser).map(Command::Llen),
            "lpop" => Lpop::try_from(&mut parser).map(Command::Lpop),
            "lpush" => Lpush::try_from(&mut parser).map(Command::Lpush),
            "lrange" => Lrange::try_from(&mut parser).map(Command::Lrange),
            "ltrim" => Ltrim::try_from(&mut parser).map(Command::Ltrim),
            "mget" => Mget::try_from(&mut parser).map(Command::Mget),
            "mset" => Mset::try_from(&mut parser).map(Command::Mset),
            "ping" => Ping::try_from(&mut parser).map(Command::Ping),
            "rpop" => Rpop::try_from(&mut parser).map(Command::Rpop),
            "rpoplpush" => Rpoplpush::try_from(&mut parser).map(Command::Rpoplpush),
            "rpush" => Rpush::try_from(&mut parser).map(Command::Rpush),
            "sadd" => Sadd::try_from(&mut parser).map(Command::Sadd),
            "scard" => Scard::try_from(&mut parser).map(Command::Scard),
            "sdiff" => Sdiff::try_from(&mut parser).map(Command::Sdiff),
            "set" => Set::try_from(&mut parser).map(Command::Set),
            "setbit" => Setbit::try_from(&mut parser).map(Command::Setbit),
            "setnx" => Setnx::try_from(&mut parser).map(Command::Setnx),
            "setrange" => Setrange::try_from(&mut parser).map(Command::Setrange),
            "sinter" => Sinter::try_from(&mut parser).map(Command::Sinter),
            "sismember" => Sismember::try_from(&mut parser).map(Command::Sismember),
            "smembers" => Smembers::try_from(&mut parser).map(Command::Smembers),
            "smove" => Smove::try_from(&mut parser).map(Command::Smove),
            "spop" => Spop::try_from(&mut parser).map(Command::Spop),
            "srem" => Srem::try_from(&mut parser).map(Command::Srem),
            "strlen" => Strlen::try_from(&mut parser).map(Command::Strlen),
            "sunion" => Sunion::try_from(&mut parser).map(Command::Sunion),
            "type" => Type::try_from(&mut parser).map(Command::Type),
            "zadd" => Zadd::try_from(&mut parser).map(Command::Zadd),
            "zcard" => Zcard::try_from(&mut parser).map(Command::Zcard),
            "zcount" => Zcount::try_from(&mut parser).map(Command::Zcount),
            "zincrby" => ZincrBy::try_from(&mut parser).map(Command::ZincrBy),
            "zinterstore" => Zinterstore::try_from(&mut parser).map(Command::Zinterstore),
            "zrange" => Zrange::try_from(&mut parser).map(Command::Zrange),
            "zrank" => Zrank::try_from(&mut parser).map(Command::Zrank),
            "zrem" => Zrem::try_from(&mut parser).map(Command::Zrem),
            "zscore" => Zscore::try_from(&mut parser).map(Command::Zscore),
            "zunionstore" => Zunionstore::try_from(&mut parser).map(Command::Zunionstore),
            _ => Err(CommandParserError::UnknownCommand {
                command: command_name.clone(),
            }
            .into()),
        }?;

        parser.finish(&command_name)?;

        Ok(command)
    }
}

pub struct CommandParser {
    parts: vec::IntoIter<Bytes>,
}

impl CommandParser {
    fn parse_command_name(&mut self) -> Result<String, CommandParserError> {
        self.next_string().map(|s| s.to_lowercase())
    }

    fn next_string(&mut self) -> Result<String, CommandParserError> {
        let bytes = self.next_bytes()?;

        str::from_utf8(&bytes[..])
            .map(|s| s.to_string())
            .map_err(CommandParserError::InvalidUTF8String)
    }

    fn next_bytes(&mut self) -> Result<Bytes, CommandParserError> {
        self.parts.next().ok_or(CommandParserError::EndOfStream)
    }

    fn next_integer(&mut self) -> Result<i64, CommandParserError> {
        self.next_parsed("integer")
    }

    /// Accepts `inf`, `+inf` and `-inf` besides regular numbers, but never NaN.
    fn next_float(&mut self) -> Result<f64, CommandParserError> {
        let float: f64 = self.next_parsed("float")?;
        if float.is_nan() {
            return Err(CommandParserError::InvalidArgument {
                expected: "float".to_string(),
                actual: float.to_string(),
            });
        }

        Ok(float)
    }

    /// A timeout in seconds, fractions allowed. `0` stands for no timeout at all, so it's returned
    /// as `None`.
    fn next_timeout(&mut self) -> Result<Option<Duration>, CommandParserError> {
        let seconds: f64 = self.next_parsed("timeout")?;

        if seconds == 0.0 {
            return Ok(None);
        }

        // Negative, non finite or too large to be represented.
        Duration::try_from_secs_f64(seconds)
            .map(Some)
            .map_err(|_| CommandParserError::InvalidArgument {
                expected: "non negative timeout".to_string(),
                actual: seconds.to_string(),
            })
    }

    fn next_parsed<T: str::FromStr>(&mut self, expected: &str) -> Result<T, CommandParserError> {
        let string = self.next_string()?;

        string
            .parse::<T>()
            .map_err(|_| CommandParserError::InvalidArgument {
                expected: expected.to_string(),
                actual: string,
            })
    }

    /// One or more keys, up to the end of the arguments.
    fn next_keys(&mut self) -> Result<Vec<String>, CommandParserError> {
        let mut keys = vec![];

        loop {
            match self.next_string() {
                Ok(key) => keys.push(key),
                Err(CommandParserError::EndOfStream) if !keys.is_empty() => {
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(keys)
    }

    /// One or more values, up to the end of the arguments.
    fn next_values(&mut self) -> Result<Vec<Bytes>, CommandParserError> {
        let mut values = vec![];

        loop {
            match self.next_bytes() {
                Ok(value) => values.push(value),
                Err(CommandParserError::EndOfStream) if !values.is_empty() => {
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(values)
    }

    /// One or more pairs, up to the end of the arguments.
    fn next_pairs(&mut self) -> Result<Vec<(Bytes, Bytes)>, CommandParserError> {
        let mut pairs = vec![];

        loop {
            let first = match self.next_bytes() {
                Ok(first) => first,
                Err(CommandParserError::EndOfStream) if !pairs.is_empty() => {
                    break;
                }
                Err(err) => return Err(err),
            };

            pairs.push((first, self.next_bytes()?));
        }

        Ok(pairs)
    }

    fn has_next(&self) -> bool {
        self.parts.len() > 0
    }

    fn finish(&mut self, command: &str) -> Result<(), CommandParserError> {
        match self.parts.next() {
            Some(argument) => Err(CommandParserError::InvalidCommandArgument {
                command: command.to_string(),
                argument: String::from_utf8_lossy(&argument).to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, ThisError, PartialEq)]
pub enum CommandParserError {
    #[error("ERR invalid argument, expected {expected}, got '{actual}'")]
    InvalidArgument { expected: String, actual: String },
    #[error("ERR unknown command '{command}'")]
    UnknownCommand { command: String },
    #[error("ERR syntax error, unexpected argument '{argument}' for '{command}'")]
    InvalidCommandArgument { command: String, argument: String },
    #[error("ERR invalid UTF-8 string")]
    InvalidUTF8String(#[from] str::Utf8Error),
    #[error("ERR wrong number of arguments")]
    EndOfStream,
}
