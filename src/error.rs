use std::path::PathBuf;

use crate::{io::FromFileError, walk::WalkError};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("unable to find tsconfig.json in {cwd:?} or any parent directory")]
    ConfigNotFound { cwd: PathBuf },

    #[error("unable to resolve absolute path for {path:?}")]
    AbsolutePath {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    #[error(transparent)]
    ReadConfig(#[from] FromFileError),

    #[error("unable to compile pattern {pattern:?}")]
    Pattern {
        #[source]
        source: globset::Error,
        pattern: String,
    },

    #[error(transparent)]
    Walk(#[from] WalkError),
}
