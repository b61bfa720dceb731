use clap::Parser;
use typekv::repl::{self, Config, MAX_LINE_LENGTH, PROMPT};
use typekv::Error;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Longest accepted input line, in bytes
    #[arg(long, env = "TYPEKV_MAX_LINE_LENGTH", default_value_t = MAX_LINE_LENGTH)]
    max_line_length: usize,

    /// Prompt shown before every command, empty to disable
    #[arg(long, env = "TYPEKV_PROMPT", default_value = PROMPT)]
    prompt: String,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Args::parse();

    repl::run(Config {
        max_line_length: args.max_line_length,
        prompt: args.prompt,
    })
    .await
}
