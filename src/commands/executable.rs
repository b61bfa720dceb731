use crate::engine::Engine;
use crate::reply::Reply;
use crate::Error;

/// A command that completes without waiting. Engine errors such as a type mismatch are part of
/// the reply; `Err` is kept for failures of the command itself.
pub trait Executable {
    fn exec(self, engine: Engine) -> Result<Reply, Error>;
}
