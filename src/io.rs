use std::{
    error::Error,
    fmt::Display,
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tokio::io::AsyncReadExt;

#[derive(Debug)]
#[non_exhaustive]
pub struct FromFileError {
    path: PathBuf,
    kind: FromFileErrorKind,
}

impl FromFileError {
    /// The file that could not be loaded.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> &FromFileErrorKind {
        &self.kind
    }
}

impl Display for FromFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            FromFileErrorKind::Open(_) => write!(f, "unable to open file {:?}", self.path),
            FromFileErrorKind::Read(_) => write!(f, "unable to read file {:?}", self.path),
            FromFileErrorKind::Parse(_) => write!(f, "unable to parse file {:?}", self.path),
        }
    }
}

impl Error for FromFileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            FromFileErrorKind::Open(err) => Some(err),
            FromFileErrorKind::Read(err) => Some(err),
            FromFileErrorKind::Parse(err) => Some(err),
        }
    }
}

#[derive(Debug)]
pub enum FromFileErrorKind {
    #[non_exhaustive]
    Open(io::Error),
    #[non_exhaustive]
    Read(io::Error),
    #[non_exhaustive]
    Parse(serde_json::Error),
}

fn with_path<T>(path: &Path, result: Result<T, FromFileErrorKind>) -> Result<T, FromFileError> {
    result.map_err(|kind| FromFileError {
        path: path.to_owned(),
        kind,
    })
}

pub(crate) fn read_json_from_file<P, T>(path: P) -> Result<T, FromFileError>
where
    P: AsRef<Path>,
    for<'de> T: Deserialize<'de>,
{
    fn inner<T>(path: &Path) -> Result<T, FromFileError>
    where
        for<'de> T: Deserialize<'de>,
    {
        // Reading a file into a string before invoking Serde is faster than
        // invoking Serde from a BufReader, see
        // https://github.com/serde-rs/json/issues/160
        with_path(
            path,
            (|| {
                let mut string = String::new();
                File::open(path)
                    .map_err(FromFileErrorKind::Open)?
                    .read_to_string(&mut string)
                    .map_err(FromFileErrorKind::Read)?;
                serde_json::from_str(&string).map_err(FromFileErrorKind::Parse)
            })(),
        )
    }
    inner(path.as_ref())
}

pub(crate) async fn read_json_from_file_async<P, T>(path: P) -> Result<T, FromFileError>
where
    P: AsRef<Path>,
    for<'de> T: Deserialize<'de>,
{
    let path = path.as_ref();
    let result = async {
        let mut string = String::new();
        tokio::fs::File::open(path)
            .await
            .map_err(FromFileErrorKind::Open)?
            .read_to_string(&mut string)
            .await
            .map_err(FromFileErrorKind::Read)?;
        serde_json::from_str(&string).map_err(FromFileErrorKind::Parse)
    }
    .await;
    with_path(path, result)
}
