use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
};

use log::debug;
use rayon::prelude::*;

use crate::{
    config::{TsConfig, TSCONFIG_FILENAME},
    error::Error,
    find_up::{find_file, find_file_async},
    matcher::Rules,
    patterns::{extensions, PatternSet},
    walk::{walk, walk_async},
};

fn compile_rules(config: &TsConfig) -> Result<Rules, Error> {
    let extensions = extensions(config);
    debug!("extensions: {:?}", extensions);
    let patterns = PatternSet::with_extensions(config, &extensions);
    debug!("include patterns: {:?}", patterns.include);
    debug!("exclude patterns: {:?}", patterns.exclude);
    Rules::compile(&patterns)
}

fn absolute(cwd: &Path) -> Result<PathBuf, Error> {
    std::path::absolute(cwd).map_err(|source| Error::AbsolutePath {
        source,
        path: cwd.to_owned(),
    })
}

// A located tsconfig.json always has a parent directory
fn project_directory(tsconfig_file: &Path) -> &Path {
    tsconfig_file.parent().unwrap_or_else(|| Path::new("."))
}

/// Enumerate the files declared by `config`, relative to `cwd`.
pub fn files_from_tsconfig_json_sync<P>(config: &TsConfig, cwd: P) -> Result<Vec<PathBuf>, Error>
where
    P: AsRef<Path>,
{
    let rules = compile_rules(config)?;
    let files = walk(cwd.as_ref(), &rules)?;
    debug!("matched {} files in {:?}", files.len(), cwd.as_ref());
    Ok(files)
}

/// Enumerate the files declared by `config`, relative to `cwd`.
pub async fn files_from_tsconfig_json<P>(config: &TsConfig, cwd: P) -> Result<Vec<PathBuf>, Error>
where
    P: AsRef<Path>,
{
    let rules = compile_rules(config)?;
    let files = walk_async(cwd.as_ref(), &rules).await?;
    debug!("matched {} files in {:?}", files.len(), cwd.as_ref());
    Ok(files)
}

/// Locate the nearest tsconfig.json in `cwd` or its ancestors and enumerate
/// the files it declares, relative to the directory containing it.
pub fn files_from_tsconfig_sync<P: AsRef<Path>>(cwd: P) -> Result<Vec<PathBuf>, Error> {
    let cwd = absolute(cwd.as_ref())?;
    let tsconfig_file =
        find_file(&cwd, TSCONFIG_FILENAME).ok_or_else(|| Error::ConfigNotFound { cwd })?;
    debug!("using {:?}", tsconfig_file);
    let config = TsConfig::from_file(&tsconfig_file)?;
    files_from_tsconfig_json_sync(&config, project_directory(&tsconfig_file))
}

/// Locate the nearest tsconfig.json in `cwd` or its ancestors and enumerate
/// the files it declares, relative to the directory containing it.
pub async fn files_from_tsconfig<P: AsRef<Path>>(cwd: P) -> Result<Vec<PathBuf>, Error> {
    let cwd = absolute(cwd.as_ref())?;
    let found = find_file_async(&cwd, TSCONFIG_FILENAME).await;
    let tsconfig_file = found.ok_or_else(|| Error::ConfigNotFound { cwd })?;
    debug!("using {:?}", tsconfig_file);
    let config = TsConfig::from_file_async(&tsconfig_file).await?;
    files_from_tsconfig_json(&config, project_directory(&tsconfig_file)).await
}

/// Resolve several projects at once, keyed by the directory containing each
/// located tsconfig.json. Projects are resolved in parallel; the first
/// failure is returned and no partial map is produced.
pub fn files_by_project<I>(cwds: I) -> Result<HashMap<PathBuf, Vec<PathBuf>>, Error>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    // Two starting points inside the same project share one walk
    let projects = cwds
        .into_iter()
        .map(|cwd| -> Result<PathBuf, Error> {
            let cwd = absolute(cwd.as_ref())?;
            find_file(&cwd, TSCONFIG_FILENAME).ok_or_else(|| Error::ConfigNotFound { cwd })
        })
        .collect::<Result<HashSet<_>, _>>()?;

    let files_by_project = projects
        .into_par_iter()
        .map(|tsconfig_file| -> Result<(PathBuf, Vec<PathBuf>), Error> {
            let config = TsConfig::from_file(&tsconfig_file)?;
            let directory = project_directory(&tsconfig_file).to_owned();
            let files = files_from_tsconfig_json_sync(&config, &directory)?;
            Ok((directory, files))
        })
        .collect::<Result<HashMap<_, _>, _>>()?;

    debug!("files_by_project: {:?}", files_by_project);
    Ok(files_by_project)
}
