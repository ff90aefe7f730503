use std::path::PathBuf;
use thiserror::Error;

use super::RegistryError;

#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("failed to read descriptor '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse descriptor '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("unsupported descriptor format: {format} (expected json or yaml)")]
    UnsupportedFormat { format: String },

    #[error("descriptor '{path}' rejected: {source}")]
    Rejected {
        path: PathBuf,
        source: RegistryError,
    },
}

impl DescriptorError {
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    pub fn rejected(path: impl Into<PathBuf>, source: RegistryError) -> Self {
        Self::Rejected {
            path: path.into(),
            source,
        }
    }
}
