//! Error types for page definition loading and the state collaborators.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error, Clone)]
/// Errors produced while loading a page definition or talking to a collaborator.
///
/// User-facing validation failures are not errors: they are reported as
/// [`crate::Errors`] values so the page can be redisplayed.
pub enum Error {
    #[error("{message}")]
    /// I/O or filesystem read error.
    Read {
        /// Optional path associated with the read error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// The definition is malformed: bad JSON, unknown component type, missing name.
    Definition {
        /// Optional path of the definition file.
        path: Option<PathBuf>,
        /// Optional 1-based line number reported by the JSON parser.
        line: Option<usize>,
        /// Optional 1-based column number reported by the JSON parser.
        col: Option<usize>,
        /// Human-readable error message.
        message: String,
    },
    #[error("component '{component}' references unknown list '{list}'")]
    /// A choice component names a page-level list that is not declared.
    UnknownList {
        /// Name of the referencing component.
        component: String,
        /// Name of the missing list.
        list: String,
    },
    #[error("field name '{name}' is declared more than once")]
    /// Two form components contribute the same field name to one page.
    DuplicateName {
        /// The repeated field name.
        name: String,
    },
    #[error("{message}")]
    /// The state store failed outright (as opposed to rejecting the update).
    Store {
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// The address lookup collaborator failed.
    Lookup {
        /// Human-readable error message.
        message: String,
    },
}

impl Error {
    /// Build a definition error without location information.
    pub(crate) fn definition(message: impl Into<String>) -> Self {
        Self::Definition {
            path: None,
            line: None,
            col: None,
            message: message.into(),
        }
    }

    /// Wrap a serde_json error as a definition error, keeping its location.
    pub(crate) fn from_json(err: &serde_json::Error, path: Option<&Path>) -> Self {
        let (line, col) = if err.line() > 0 {
            (Some(err.line()), Some(err.column()))
        } else {
            (None, None)
        };
        Self::Definition {
            path: path.map(Path::to_path_buf),
            line,
            col,
            message: err.to_string(),
        }
    }

    /// Attach a path to definition and read errors that lack one.
    pub(crate) fn with_path(self, p: &Path) -> Self {
        match self {
            Self::Read { path: None, message } => Self::Read {
                path: Some(p.to_path_buf()),
                message,
            },
            Self::Definition {
                path: None,
                line,
                col,
                message,
            } => Self::Definition {
                path: Some(p.to_path_buf()),
                line,
                col,
                message,
            },
            other => other,
        }
    }

    /// Render a human-friendly error message including location when available.
    pub fn pretty(&self) -> String {
        match self {
            Self::Read { path, message } => match path {
                Some(p) => format!("Read error at {}: {}", p.display(), message),
                None => format!("Read error: {}", message),
            },
            Self::Definition {
                path,
                line,
                col,
                message,
            } => {
                let loc = match (line, col) {
                    (Some(l), Some(c)) => format!("{}:{}", l, c),
                    (Some(l), None) => format!("{}", l),
                    _ => String::new(),
                };
                match path {
                    Some(p) if !loc.is_empty() => format!(
                        "Page definition error at {}:{}\n{}",
                        p.display(),
                        loc,
                        message
                    ),
                    Some(p) => format!("Page definition error at {}\n{}", p.display(), message),
                    None if !loc.is_empty() => {
                        format!("Page definition error at {}\n{}", loc, message)
                    }
                    None => format!("Page definition error\n{}", message),
                }
            }
            Self::UnknownList { .. } | Self::DuplicateName { .. } => {
                format!("Page definition error\n{}", self)
            }
            Self::Store { message } => format!("State store error: {}", message),
            Self::Lookup { message } => format!("Address lookup error: {}", message),
        }
    }

    /// Access the optional path attached to this error.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Definition { path, .. } => path.as_deref(),
            _ => None,
        }
    }
}
