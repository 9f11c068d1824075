/*!
 * Error types for the lrcproc library.
 *
 * The lyric parser and formatter never fail; these errors belong to the
 * layers around them (file access and configuration), using the thiserror
 * crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading or writing lyric files
#[derive(Error, Debug)]
pub enum LyricFileError {
    /// The file could not be opened or read
    #[error("Failed to read lyric file {path:?}: {source}")]
    Read {
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file or its parent directory could not be written
    #[error("Failed to write lyric file {path:?}: {source}")]
    Write {
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl LyricFileError {
    /// Path of the file the error refers to
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } => path,
        }
    }
}

/// Errors that can occur when validating the configuration
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// Timestamp precision is higher than the formatter supports
    #[error("Decimal places must be at most {max}, got {value}")]
    DecimalPlacesTooHigh {
        /// Configured value
        value: u32,
        /// Highest accepted value
        max: u32,
    },

    /// The line ending is empty
    #[error("Line ending must not be empty")]
    EmptyLineEnding,

    /// The lyric file extension is empty
    #[error("Lyric file extension must not be empty")]
    EmptyExtension,
}
