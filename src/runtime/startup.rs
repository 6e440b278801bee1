use crate::config::Settings;
use crate::error::ListingError;
use crate::remote::{GithubContents, LibrarySource, LocalTree};

use super::cli::Cli;

/// Fold command-line overrides into the loaded settings.
pub fn apply_overrides(settings: &mut Settings, cli: &Cli) {
    if let Some(root) = &cli.root {
        settings.library.root_path = root.clone();
    }
    if cli.shuffle {
        settings.playback.shuffle = true;
    }
}

/// Pick the listing source: `--local` reads a directory on disk, otherwise the
/// configured repository.
///
/// Without `--root`, a local directory is itself the walk root, so files
/// directly inside it are grouped under its name.
pub fn build_source(settings: &mut Settings, cli: &Cli) -> Result<LibrarySource, ListingError> {
    match &cli.local {
        Some(dir) if cli.root.is_some() => Ok(LibrarySource::Local(LocalTree::new(dir))),
        Some(dir) => {
            let dir = std::fs::canonicalize(dir).unwrap_or_else(|_| dir.clone());
            let (tree, root) = LocalTree::rooted_at(&dir);
            settings.library.root_path = root;
            Ok(LibrarySource::Local(tree))
        }
        None => GithubContents::new(&settings.remote).map(LibrarySource::Github),
    }
}
