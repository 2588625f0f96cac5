use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::dni::EncodeError;

/**
 * Every way a run of the tool can fail. All of them are terminal: nothing is
 * retried and no partial output is kept.
 */
#[derive(Debug, Error)]
pub enum Error {
    #[error("no board specified")]
    NoBoard,
    #[error("no input file specified")]
    NoInput,
    #[error("no output file specified")]
    NoOutput,

    #[error("stat failed on {}: {source}", .path.display())]
    Stat { path: PathBuf, source: io::Error },
    #[error("could not open \"{}\" for reading: {source}", .path.display())]
    OpenInput { path: PathBuf, source: io::Error },
    #[error("unable to read from file {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("could not open \"{}\" for writing: {source}", .path.display())]
    OpenOutput { path: PathBuf, source: io::Error },
    #[error("unable to write to file {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        1
    }
}
