use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StopwatchError {
    #[error("failed to write {line} line")]
    Write {
        line: &'static str,
        #[source]
        source: io::Error,
    },
}

impl StopwatchError {
    pub(crate) fn write(line: &'static str, source: io::Error) -> Self {
        Self::Write { line, source }
    }
}

pub type Result<T> = std::result::Result<T, StopwatchError>;
