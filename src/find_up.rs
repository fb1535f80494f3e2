use std::path::{Path, PathBuf};

use log::trace;

/// Search `starting_from` and each of its ancestors for a file named
/// `target_filename`, returning the path of the first one found.
pub(crate) fn find_file(starting_from: &Path, target_filename: &str) -> Option<PathBuf> {
    let starting_directory = if starting_from.is_file() {
        starting_from.parent().unwrap_or_else(|| Path::new("."))
    } else {
        starting_from
    };

    starting_directory
        .ancestors()
        .map(|directory| directory.join(target_filename))
        .inspect(|candidate| trace!("looking for {:?}", candidate))
        .find(|candidate| candidate.is_file())
}

pub(crate) async fn find_file_async(starting_from: &Path, target_filename: &str) -> Option<PathBuf> {
    let starting_directory = match tokio::fs::metadata(starting_from).await {
        Ok(metadata) if metadata.is_file() => {
            starting_from.parent().unwrap_or_else(|| Path::new("."))
        }
        _ => starting_from,
    };

    for directory in starting_directory.ancestors() {
        let candidate = directory.join(target_filename);
        trace!("looking for {:?}", candidate);
        if let Ok(metadata) = tokio::fs::metadata(&candidate).await {
            if metadata.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}
