/*!
 * # lrcproc - LRC lyric file processor
 *
 * A Rust library for reading, editing and rewriting LRC lyric files.
 *
 * ## Features
 *
 * - Parse LRC text into metadata tags and time-ordered lyric lines
 * - Tolerate malformed input: unknown bracket content is kept as plain text
 * - Write lyrics back with configurable:
 *   - Time tag precision
 *   - Text padding
 *   - Global time offset
 *   - Line endings
 * - Edit documents in place (insert, remove, strip time tags, drop blank lines)
 * - Batch processing of whole directories from the command line
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `time_tag`: Time tag encoding and decoding shared by parser and formatter
 * - `lyric_processor`: Parser, formatter, document model and processor wrapper
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: File and folder processing
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod lyric_processor;
pub mod time_tag;

// Re-export main types for easier usage
pub use app_config::Config;
pub use lyric_processor::{
    format_lyric, parse_lyric, FormatOptions, InfoMap, LyricDocument, LyricEntry, LyricProcessor,
};
pub use time_tag::{format_time_tag, parse_time_tag};
pub use errors::{ConfigError, LyricFileError};
