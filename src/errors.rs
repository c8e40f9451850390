use std::error::Error as StdError;
use std::fmt;
use std::num::ParseIntError;
use std::string::FromUtf8Error;

use itertools::Itertools;

// type alias for Result for use across the library
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// A character in path data which is not one of the known command letters.
    UnknownCommand { command: char, offset: usize },
    /// A command letter was recognised but its arguments could not be read.
    MissingArgument { command: char, offset: usize },
    UnsupportedFeature(String),
    InvalidValue(String, String),
    Document(String),
    Io(std::io::Error),
    Cli(String),
    /// Per-path failures collected during document import; keyed by the
    /// (zero-based) index of the path element in the document.
    Multi(Vec<(usize, Error)>),
    Other(Box<dyn StdError + Send + Sync>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownCommand { command, offset } => {
                write!(f, "Unknown path command '{command}' at offset {offset}")
            }
            Error::MissingArgument { command, offset } => {
                write!(
                    f,
                    "Missing or malformed argument for path command '{command}' at offset {offset}"
                )
            }
            Error::UnsupportedFeature(what) => write!(f, "Not supported: {what}"),
            Error::InvalidValue(what, value) => write!(f, "Invalid {what}: '{value}'"),
            Error::Document(reason) => write!(f, "Document error: {reason}"),
            Error::Io(source) => write!(f, "IO error: {source}"),
            Error::Cli(reason) => write!(f, "{reason}"),
            Error::Multi(errors) => {
                for (idx, err) in errors.iter().sorted_by_key(|(idx, _)| *idx) {
                    write!(f, "\n {idx:>4}: {err}")?;
                }
                Ok(())
            }
            Error::Other(source) => write!(f, "{source}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io(source) => Some(source),
            Error::Other(e) => Some(&**e),
            _ => None,
        }
    }
}

impl Error {
    pub fn from_err<T>(err: T) -> Error
    where
        T: StdError + Send + Sync + 'static,
    {
        Error::Other(Box::new(err))
    }

    /// True for failures which originate in path data itself rather than
    /// in configuration or I/O.
    pub fn is_path_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownCommand { .. }
                | Error::MissingArgument { .. }
                | Error::UnsupportedFeature(_)
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<ParseIntError> for Error {
    fn from(err: ParseIntError) -> Error {
        Error::InvalidValue("integer".to_string(), err.to_string())
    }
}

impl From<FromUtf8Error> for Error {
    fn from(err: FromUtf8Error) -> Error {
        Error::Document(format!("utf8: {err}"))
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Error {
        Error::Cli(err.to_string())
    }
}
