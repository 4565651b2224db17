use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by a quality-fix run.
#[derive(Debug, Error)]
pub enum Error {
    /// The source-language tree is a hard precondition. When it is missing
    /// the run aborts before writing anything.
    #[error("source tree not found at {}", .0.display())]
    SourceTreeMissing(PathBuf),

    /// An individual filesystem operation failed. Treated as an environment
    /// problem: propagated, never retried.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: &std::path::Path, source: io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
