use std::{
    ffi::OsString,
    fmt::Display,
    fs::FileType,
    io,
    path::{Path, PathBuf},
};

use log::trace;
use walkdir::WalkDir;

use crate::{
    matcher::{Decision, Rules},
    path::{relative_to_root, to_slash, StripPrefixError},
};

#[derive(Debug)]
#[non_exhaustive]
pub struct WalkError {
    kind: WalkErrorKind,
}

impl WalkError {
    pub fn kind(&self) -> &WalkErrorKind {
        &self.kind
    }
}

impl Display for WalkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            WalkErrorKind::WalkDir(err) => match err.path() {
                Some(path) => write!(f, "unable to walk directory tree at {:?}", path),
                None => write!(f, "unable to walk directory tree"),
            },
            WalkErrorKind::Io { path, source: _ } => {
                write!(f, "unable to walk directory tree at {:?}", path)
            }
            WalkErrorKind::Path(_) => write!(f, "unable to strip path prefix"),
        }
    }
}

impl std::error::Error for WalkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            WalkErrorKind::WalkDir(err) => Some(err),
            WalkErrorKind::Io { path: _, source } => Some(source),
            WalkErrorKind::Path(err) => Some(err),
        }
    }
}

impl From<WalkErrorKind> for WalkError {
    fn from(kind: WalkErrorKind) -> Self {
        Self { kind }
    }
}

impl From<walkdir::Error> for WalkError {
    fn from(err: walkdir::Error) -> Self {
        Self {
            kind: WalkErrorKind::WalkDir(err),
        }
    }
}

impl From<StripPrefixError> for WalkError {
    fn from(err: StripPrefixError) -> Self {
        Self {
            kind: WalkErrorKind::Path(err),
        }
    }
}

#[derive(Debug)]
pub enum WalkErrorKind {
    #[non_exhaustive]
    WalkDir(walkdir::Error),
    #[non_exhaustive]
    Io { path: PathBuf, source: io::Error },
    #[non_exhaustive]
    Path(StripPrefixError),
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> WalkError + '_ {
    move |source| {
        WalkError::from(WalkErrorKind::Io {
            path: path.to_owned(),
            source,
        })
    }
}

/// Decide whether one visited entry belongs in the result. Directories are
/// never emitted, but the walk still descends into them.
fn visit(
    root: &Path,
    path: &Path,
    is_file: bool,
    rules: &Rules,
) -> Result<Option<PathBuf>, WalkError> {
    if !is_file {
        return Ok(None);
    }
    let relative = relative_to_root(root, path)?;
    let decision = rules.classify(&to_slash(&relative));
    trace!("{:?}: {:?}", relative, decision);
    Ok((decision == Decision::Included).then_some(relative))
}

/// Walk every entry beneath `root` in pre-order, children sorted by file
/// name, and collect the relative paths of files accepted by `rules`.
pub(crate) fn walk(root: &Path, rules: &Rules) -> Result<Vec<PathBuf>, WalkError> {
    // The root must be a readable directory, as in `walk_async`
    std::fs::read_dir(root).map_err(io_error(root))?;
    let mut included = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if let Some(relative) = visit(root, entry.path(), is_file, rules)? {
            included.push(relative);
        }
    }
    Ok(included)
}

struct Entry {
    file_name: OsString,
    path: PathBuf,
    file_type: FileType,
}

async fn read_dir_sorted(directory: &Path) -> Result<Vec<Entry>, WalkError> {
    let mut read_dir = tokio::fs::read_dir(directory)
        .await
        .map_err(io_error(directory))?;
    let mut entries = Vec::new();
    while let Some(entry) = read_dir.next_entry().await.map_err(io_error(directory))? {
        let path = entry.path();
        let file_type = entry.file_type().await.map_err(io_error(&path))?;
        entries.push(Entry {
            file_name: entry.file_name(),
            path,
            file_type,
        });
    }
    entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(entries)
}

/// The same traversal as [`walk`], suspending on each directory read.
pub(crate) async fn walk_async(root: &Path, rules: &Rules) -> Result<Vec<PathBuf>, WalkError> {
    let mut included = Vec::new();
    let mut pending: Vec<Entry> = read_dir_sorted(root).await?.into_iter().rev().collect();

    while let Some(entry) = pending.pop() {
        if entry.file_type.is_dir() {
            pending.extend(read_dir_sorted(&entry.path).await?.into_iter().rev());
            continue;
        }
        let is_file = entry.file_type.is_file()
            || (entry.file_type.is_symlink()
                && tokio::fs::metadata(&entry.path)
                    .await
                    .map_or(false, |metadata| metadata.is_file()));
        if let Some(relative) = visit(root, &entry.path, is_file, rules)? {
            included.push(relative);
        }
    }
    Ok(included)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::patterns::PatternSet;

    fn rules(include: &[&str], exclude: &[&str]) -> Rules {
        Rules::compile(&PatternSet {
            include: include.iter().map(|s| s.to_string()).collect(),
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
        })
        .unwrap()
    }

    fn fixture() -> tempfile::TempDir {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("b/nested")).unwrap();
        fs::create_dir_all(root.join("a")).unwrap();
        for file in ["z.ts", "b/nested/c.ts", "b/a.ts", "a/b.ts", "a/readme.md"] {
            fs::write(root.join(file), "").unwrap();
        }
        temp_dir
    }

    fn paths(paths: &[&str]) -> Vec<PathBuf> {
        paths.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn walk_emits_files_in_sorted_pre_order() {
        let temp_dir = fixture();
        let actual = walk(temp_dir.path(), &rules(&["**/*.ts"], &[])).unwrap();
        assert_eq!(actual, paths(&["a/b.ts", "b/a.ts", "b/nested/c.ts", "z.ts"]));
    }

    #[test]
    fn directories_are_never_emitted() {
        let temp_dir = fixture();
        let actual = walk(temp_dir.path(), &rules(&["**/*", "a", "b/nested"], &[])).unwrap();
        assert!(!actual.contains(&PathBuf::from("a")));
        assert!(!actual.contains(&PathBuf::from("b/nested")));
        assert!(actual.contains(&PathBuf::from("a/readme.md")));
    }

    #[test]
    fn exclude_wins_over_include() {
        let temp_dir = fixture();
        let actual = walk(temp_dir.path(), &rules(&["**/*.ts"], &["b/**/*"])).unwrap();
        assert_eq!(actual, paths(&["a/b.ts", "z.ts"]));
    }

    #[test]
    fn missing_root_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("missing");
        assert!(walk(&missing, &rules(&["**/*"], &[])).is_err());
    }

    #[test]
    fn file_root_is_an_error() {
        let temp_dir = fixture();
        let file = temp_dir.path().join("z.ts");
        let err = walk(&file, &rules(&["**/*"], &[])).unwrap_err();
        assert!(matches!(err.kind(), WalkErrorKind::Io { .. }));
    }

    #[tokio::test]
    async fn async_walk_rejects_file_root_like_sync_walk() {
        let temp_dir = fixture();
        let file = temp_dir.path().join("z.ts");
        let rules = rules(&["**/*"], &[]);
        let sync_err = walk(&file, &rules).unwrap_err();
        let async_err = walk_async(&file, &rules).await.unwrap_err();
        match (sync_err.kind(), async_err.kind()) {
            (
                WalkErrorKind::Io { path: a, source: x },
                WalkErrorKind::Io { path: b, source: y },
            ) => {
                assert_eq!(a, b);
                assert_eq!(x.kind(), y.kind());
            }
            kinds => panic!("Unexpected error kinds: {:?}", kinds),
        }
    }

    #[tokio::test]
    async fn async_walk_matches_sync_walk() {
        let temp_dir = fixture();
        let rules = rules(&["**/*"], &["a/readme.md"]);
        let expected = walk(temp_dir.path(), &rules).unwrap();
        let actual = walk_async(temp_dir.path(), &rules).await.unwrap();
        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn async_walk_reports_missing_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("missing");
        let err = walk_async(&missing, &rules(&["**/*"], &[])).await.unwrap_err();
        assert!(matches!(err.kind(), WalkErrorKind::Io { .. }));
    }
}
