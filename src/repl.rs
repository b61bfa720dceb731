use bytes::Bytes;
use futures::StreamExt;
use thiserror::Error as ThisError;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};
use tracing::{debug, info, instrument, warn};

use crate::commands::Command;
use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

pub const MAX_LINE_LENGTH: usize = 64 * 1024;
pub const PROMPT: &str = "typekv> ";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Longer input lines are discarded with an error reply.
    pub max_line_length: usize,
    /// Written before reading every line, nothing when empty.
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_line_length: MAX_LINE_LENGTH,
            prompt: PROMPT.to_string(),
        }
    }
}

#[derive(Debug, Clone, ThisError, PartialEq)]
pub enum TokenizeError {
    #[error("ERR unbalanced quotes")]
    UnbalancedQuotes,
}

/// Runs an interactive shell over stdin and stdout against a fresh engine.
pub async fn run(config: Config) -> Result<(), Error> {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| debug!("Failed to initialize global tracing: {}", e));

    let engine = Engine::new();
    info!(max_line_length = config.max_line_length, "typekv shell started");

    serve(tokio::io::stdin(), tokio::io::stdout(), engine, &config).await
}

/// Reads commands from `reader`, one per line, and writes every rendered reply to `writer`.
///
/// Ends when the input does, or on `QUIT`.
pub async fn serve<R, W>(reader: R, mut writer: W, engine: Engine, config: &Config) -> Result<(), Error>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = FramedRead::new(
        reader,
        LinesCodec::new_with_max_length(config.max_line_length),
    );

    prompt(&mut writer, config).await?;

    // Set after a line was too long. The line is discarded, and the stream yields `None` once
    // before going on with the next one.
    let mut skipping = false;

    loop {
        let reply = match lines.next().await {
            Some(Ok(line)) if is_quit(&line) => break,
            Some(Ok(line)) => handle_line(&line, engine.clone()).await,
            Some(Err(err @ LinesCodecError::MaxLineLengthExceeded)) => {
                warn!(max_line_length = config.max_line_length, "Discarding line");
                skipping = true;
                Some(Reply::Error(format!("ERR {}", err)))
            }
            Some(Err(LinesCodecError::Io(err))) => return Err(err.into()),
            None if skipping => {
                skipping = false;
                continue;
            }
            None => break,
        };

        if let Some(reply) = reply {
            writer.write_all(reply.to_string().as_bytes()).await?;
            writer.write_all(b"\n").await?;
        }

        prompt(&mut writer, config).await?;
    }

    writer.flush().await?;
    info!("Input closed");
    Ok(())
}

/// Runs a single line. Blank lines produce no reply, errors of any kind are rendered as error
/// replies.
#[instrument(name = "line", skip(engine))]
async fn handle_line(line: &str, engine: Engine) -> Option<Reply> {
    let args = match tokenize(line) {
        Ok(args) if args.is_empty() => return None,
        Ok(args) => args,
        Err(err) => return Some(Reply::Error(err.to_string())),
    };

    let reply = match Command::try_from(args) {
        Ok(cmd) => {
            debug!("Parsed command: {:?}", cmd);
            cmd.exec(engine)
                .await
                .unwrap_or_else(|err| Reply::Error(err.to_string()))
        }
        Err(err) => Reply::Error(err.to_string()),
    };

    info!("Reply: {:?}", reply);
    Some(reply)
}

async fn prompt<W: AsyncWrite + Unpin>(writer: &mut W, config: &Config) -> Result<(), Error> {
    if !config.prompt.is_empty() {
        writer.write_all(config.prompt.as_bytes()).await?;
    }
    writer.flush().await?;
    Ok(())
}

fn is_quit(line: &str) -> bool {
    let line = line.trim();
    line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit")
}

/// Splits a line into arguments the way `redis-cli` does. Arguments are separated by whitespace
/// and may be quoted. Double quotes understand `\n`, `\r`, `\t`, `\xHH` and escaped characters,
/// single quotes only `\'`. A closing quote must end the argument.
pub fn tokenize(line: &str) -> Result<Vec<Bytes>, TokenizeError> {
    let mut args = vec![];
    let mut bytes = line.bytes().peekable();

    loop {
        while bytes.next_if(u8::is_ascii_whitespace).is_some() {}

        let Some(&first) = bytes.peek() else {
            break;
        };

        let mut arg = vec![];
        match first {
            b'"' => {
                bytes.next();
                loop {
                    match bytes.next() {
                        Some(b'"') => break,
                        Some(b'\\') => match bytes.next() {
                            Some(b'n') => arg.push(b'\n'),
                            Some(b'r') => arg.push(b'\r'),
                            Some(b't') => arg.push(b'\t'),
                            Some(b'x') => {
                                let digits: Vec<u8> = (0..2)
                                    .filter_map(|_| bytes.next_if(u8::is_ascii_hexdigit))
                                    .collect();

                                match digits.len() {
                                    2 => arg.push(
                                        digits
                                            .iter()
                                            .fold(0, |acc, digit| acc * 16 + hex_value(*digit)),
                                    ),
                                    _ => {
                                        arg.push(b'x');
                                        arg.extend(digits);
                                    }
                                }
                            }
                            Some(escaped) => arg.push(escaped),
                            None => return Err(TokenizeError::UnbalancedQuotes),
                        },
                        Some(byte) => arg.push(byte),
                        None => return Err(TokenizeError::UnbalancedQuotes),
                    }
                }
            }
            b'\'' => {
                bytes.next();
                loop {
                    match bytes.next() {
                        Some(b'\'') => break,
                        Some(b'\\') if bytes.peek() == Some(&b'\'') => {
                            bytes.next();
                            arg.push(b'\'');
                        }
                        Some(byte) => arg.push(byte),
                        None => return Err(TokenizeError::UnbalancedQuotes),
                    }
                }
            }
            _ => {
                while let Some(byte) = bytes.next_if(|byte| !byte.is_ascii_whitespace()) {
                    arg.push(byte);
                }
            }
        }

        // "a"b
        if matches!(first, b'"' | b'\'') && bytes.peek().is_some_and(|b| !b.is_ascii_whitespace()) {
            return Err(TokenizeError::UnbalancedQuotes);
        }

        args.push(Bytes::from(arg));
    }

    Ok(args)
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&'static str]) -> Vec<Bytes> {
        values.iter().copied().map(Bytes::from).collect()
    }

    #[test]
    fn tokenize_plain_words() {
        assert_eq!(
            tokenize("  SET  key1\tvalue "),
            Ok(args(&["SET", "key1", "value"]))
        );
        assert_eq!(tokenize("   "), Ok(vec![]));
    }

    #[test]
    fn tokenize_double_quotes() {
        assert_eq!(
            tokenize(r#"SET "my key" "a\"b\n""#),
            Ok(args(&["SET", "my key", "a\"b\n"]))
        );
        assert_eq!(tokenize(r#"SET k "\x41\x7a""#), Ok(args(&["SET", "k", "Az"])));
        assert_eq!(tokenize(r#"SET k """#), Ok(args(&["SET", "k", ""])));
    }

    #[test]
    fn tokenize_single_quotes() {
        assert_eq!(
            tokenize(r#"SET k 'it\'s \n'"#),
            Ok(args(&["SET", "k", "it's \\n"]))
        );
    }

    #[test]
    fn tokenize_unbalanced() {
        assert_eq!(
            tokenize(r#"SET k "value"#),
            Err(TokenizeError::UnbalancedQuotes)
        );
        assert_eq!(tokenize("SET k 'value"), Err(TokenizeError::UnbalancedQuotes));
        assert_eq!(
            tokenize(r#"SET k "a"b"#),
            Err(TokenizeError::UnbalancedQuotes)
        );
    }

    #[tokio::test]
    async fn handle_line_renders_errors() {
        let engine = Engine::new();

        assert_eq!(handle_line("", engine.clone()).await, None);
        assert_eq!(
            handle_line("NOPE", engine.clone()).await,
            Some(Reply::Error("ERR unknown command 'nope'".to_string()))
        );
        assert_eq!(
            handle_line("GET \"key", engine.clone()).await,
            Some(Reply::Error("ERR unbalanced quotes".to_string()))
        );

        engine.rpush("key1", args(&["a"])).unwrap();
        assert_eq!(
            handle_line("GET key1", engine).await,
            Some(Reply::Error(
                "WRONGTYPE Operation against a key holding the wrong kind of value".to_string()
            ))
        );
    }

    #[test]
    fn quit() {
        assert!(is_quit("QUIT"));
        assert!(is_quit(" exit "));
        assert!(!is_quit("quit now"));
    }
}
