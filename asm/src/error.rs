use arch::op::Mnemonic;
use thiserror::Error;

use crate::{line::SourceLine, msg::Msg};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed statement")]
    MalformedLine,

    #[error("Cannot use reserved keyword `{0}` as label")]
    ReservedLabelName(String),

    #[error("Duplicate label: `{0}`")]
    DuplicateLabel(String),

    #[error("Unknown instruction: `{0}`")]
    UnknownInstruction(String),

    #[error("Invalid arguments: `{0}` takes {1}")]
    MalformedArguments(Mnemonic, &'static str),

    #[error("Invalid operand `{0}`: expected {1}")]
    InvalidOperand(String, &'static str),

    #[error("Cannot parse `{0}` as integer literal")]
    InvalidLiteral(String),

    #[error("Undefined label: `{0}`")]
    UnresolvedLabel(String),

    #[error("Jump out of range: offset {offset} is outside {min}..={max}")]
    BranchOutOfRange { offset: i64, min: i64, max: i64 },

    #[error("Program too large ({len} instructions, max allowed is {max})")]
    ProgramTooLarge { len: usize, max: usize },

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

/// Terminal failure of one assembly run, tied to the source line that caused it.
#[derive(Error, Debug)]
#[error("{error}")]
pub struct Report {
    pub line: Option<SourceLine>,
    pub error: Error,
    /// Earlier definition that the offending line collides with.
    pub previous: Option<SourceLine>,
}

impl Report {
    pub fn at(line: &SourceLine, error: Error) -> Self {
        Report {
            line: Some(line.clone()),
            error,
            previous: None,
        }
    }

    pub fn bare(error: Error) -> Self {
        Report {
            line: None,
            error,
            previous: None,
        }
    }

    pub fn with_previous(mut self, line: &SourceLine) -> Self {
        self.previous = Some(line.clone());
        self
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, file: &str) {
        Msg::Error(self.error.to_string()).print(file, self.line.as_ref());
        if let Some(prev) = &self.previous {
            Msg::Note("Already defined here".to_string()).print(file, Some(prev));
        }
    }
}

impl From<Error> for Report {
    fn from(error: Error) -> Self {
        Report::bare(error)
    }
}
