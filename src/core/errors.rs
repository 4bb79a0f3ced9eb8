use thiserror::Error;

/// Fatal conditions that abort a replay.
///
/// Business-rule violations (unknown client, busy table, ...) are not errors;
/// they travel through the output stream as notices.
#[derive(Error, Debug)]
pub enum ClubError {
    /// Wrong command-line invocation
    #[error("bad argument: {0}")]
    BadArgument(String),

    /// Input could not be read or output could not be written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// One of the three header lines is missing or malformed
    #[error("malformed header line {line:?}: {reason}")]
    MalformedHeader { line: String, reason: String },

    /// Event line does not start with a strict `HH:MM` prefix
    #[error("malformed time in line {line:?}")]
    MalformedTime { line: String },

    /// Event kind token is not one of 1..=4
    #[error("unknown event kind in line {line:?}")]
    UnknownEventKind { line: String },

    /// Arguments after the event kind have the wrong shape
    #[error("malformed argument in line {line:?}: {reason}")]
    MalformedArgument { line: String, reason: String },

    /// Event references a table that does not exist
    #[error("table index {index} out of range 1..={table_count}")]
    IndexOutOfRange { index: usize, table_count: usize },
}

impl ClubError {
    /// Raw input line that caused the failure, when there is one.
    pub fn offending_line(&self) -> Option<&str> {
        match self {
            ClubError::MalformedHeader { line, .. }
            | ClubError::MalformedTime { line }
            | ClubError::UnknownEventKind { line }
            | ClubError::MalformedArgument { line, .. } => Some(line),
            _ => None,
        }
    }
}

pub type ClubResult<T> = Result<T, ClubError>;
