use std::{
    error::Error,
    fmt::Display,
    path::{self, Path, PathBuf},
};

#[derive(Debug)]
#[non_exhaustive]
pub struct StripPrefixError {
    root: PathBuf,
    path: PathBuf,
    inner: path::StripPrefixError,
}

impl Display for StripPrefixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "cannot strip prefix {:?} from path {:?}",
            self.root, self.path
        )
    }
}

impl Error for StripPrefixError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.inner)
    }
}

/// Express a path visited beneath `root` relative to `root`.
pub(crate) fn relative_to_root(root: &Path, path: &Path) -> Result<PathBuf, StripPrefixError> {
    path.strip_prefix(root)
        .map(ToOwned::to_owned)
        .map_err(|inner| StripPrefixError {
            root: root.to_owned(),
            path: path.to_owned(),
            inner,
        })
}

/// The forward-slash form of a relative path, which is what patterns are
/// matched against on every platform.
pub(crate) fn to_slash(path: &Path) -> String {
    let string = path.to_string_lossy();
    if path::MAIN_SEPARATOR == '/' {
        string.into_owned()
    } else {
        string.replace(path::MAIN_SEPARATOR, "/")
    }
}
