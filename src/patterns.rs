//! Translate the `files`, `include` and `exclude` fields of a tsconfig.json
//! into the glob patterns matched during traversal.
//!
//! From the [tsconfig include] documentation:
//!
//! > If a glob pattern doesn’t include a file extension, then only files
//! > with supported extensions are included (e.g. .ts, .tsx, and .d.ts by
//! > default, with .js and .jsx if allowJs is set to true).
//!
//! A bare path such as `src` therefore expands to `src` itself plus
//! `src/**/*<extension>` for each supported extension, while a pattern ending
//! in a wildcard is used as written.
//!
//! [tsconfig include]: https://www.typescriptlang.org/tsconfig#include

use std::iter;

use crate::config::TsConfig;

/// Extensions that are always in scope: declaration files, then plain, then JSX.
pub const TYPESCRIPT_EXTENSIONS: [&str; 3] = [".d.ts", ".ts", ".tsx"];

/// Extensions added when `compilerOptions.allowJs` is set.
pub const JAVASCRIPT_EXTENSIONS: [&str; 2] = [".js", ".jsx"];

// Excludes match the path itself or anything beneath it.
const EXCLUDE_EXTENSIONS: [&str; 1] = [""];

/// The ordered list of file extensions in scope for `config`.
pub fn extensions(config: &TsConfig) -> Vec<&'static str> {
    let mut extensions = TYPESCRIPT_EXTENSIONS.to_vec();
    if config.allow_js() {
        extensions.extend(JAVASCRIPT_EXTENSIONS);
    }
    extensions
}

/// Include and exclude patterns in the order they were generated.
///
/// Duplicates are kept; a path is included when any include pattern matches
/// it and no exclude pattern does.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatternSet {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl PatternSet {
    pub fn from_config(config: &TsConfig) -> Self {
        Self::with_extensions(config, &extensions(config))
    }

    pub fn with_extensions(config: &TsConfig, extensions: &[&str]) -> Self {
        let include = match (&config.files, &config.include) {
            (None, None) => default_include(extensions),
            (files, include) => {
                let files = files
                    .iter()
                    .flatten()
                    .map(|file| escape_literal(&normalize(file)));
                let include = include
                    .iter()
                    .flatten()
                    .flat_map(|glob| expand_glob(&normalize(glob), extensions));
                files.chain(include).collect()
            }
        };

        let exclude = config
            .exclude
            .iter()
            .flatten()
            .flat_map(|glob| expand_glob(&normalize(glob), &EXCLUDE_EXTENSIONS))
            .collect();

        Self { include, exclude }
    }
}

/// The include patterns used when a config names neither `files` nor `include`.
pub fn default_include(extensions: &[&str]) -> Vec<String> {
    extensions
        .iter()
        .map(|extension| format!("**/*{extension}"))
        .collect()
}

/// Expand one `include` or `exclude` entry into the patterns it stands for.
pub fn expand_glob(glob: &str, extensions: &[&str]) -> Vec<String> {
    if glob.ends_with('*') {
        return vec![glob.to_owned()];
    }

    let base = glob.strip_suffix('/').unwrap_or(glob);
    // `.` names the project root, which is never matched itself
    if base.is_empty() || base == "." {
        return default_include(extensions);
    }

    iter::once(base.to_owned())
        .chain(
            extensions
                .iter()
                .map(|extension| format!("{base}/**/*{extension}")),
        )
        .collect()
}

/// Convert backslash separators to forward slashes and drop leading `./`.
pub(crate) fn normalize(entry: &str) -> String {
    let slashed = entry.replace('\\', "/");
    let mut rest = slashed.as_str();
    while let Some(stripped) = rest.strip_prefix("./") {
        rest = stripped;
    }
    rest.to_owned()
}

/// Escape glob metacharacters so a `files` entry matches only itself.
pub(crate) fn escape_literal(entry: &str) -> String {
    let mut escaped = String::with_capacity(entry.len());
    for c in entry.chars() {
        if matches!(c, '*' | '?' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
