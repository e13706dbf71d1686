use std::path::PathBuf;

use thiserror::Error;

/// Failure taxonomy for a paint run.
///
/// Every fallible operation above the raw git plumbing returns this type.
/// Nothing in the library prints or exits; errors propagate to the CLI entry
/// point, which is the only place that reports them and picks an exit status.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed input the tool cannot infer: an unreadable or
    /// invalid pattern file, a character with no authored pattern, or bad
    /// command-line arguments.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The target path is neither a usable repository nor creatable, or an
    /// underlying git operation failed.
    #[error("repository error: {0}")]
    Repository(String),

    /// The auto-generated target file already exists; the tool refuses to
    /// overwrite or rename.
    #[error("target file `{}` already exists", .0.display())]
    NamingCollision(PathBuf),
}
