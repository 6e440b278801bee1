use tracing::{debug, warn};

use crate::config::LibrarySettings;
use crate::progress::ProgressReporter;
use crate::remote::{DirectoryListing, EntryKind, ListingSource, join_path, last_segment};

use super::model::DiscoveredFile;

/// Progress value reported while directories are being walked.
pub(crate) const WALK_PERCENT: f64 = 10.0;

pub(crate) fn is_eligible(name: &str, settings: &LibrarySettings) -> bool {
    let ext = settings.normalized_extension();
    if ext.is_empty() {
        return false;
    }
    name.rsplit_once('.')
        .map(|(_, found)| found.eq_ignore_ascii_case(&ext))
        .unwrap_or(false)
}

/// One directory whose entries are still being visited.
struct Frame {
    path: String,
    entries: std::vec::IntoIter<DirectoryListing>,
}

/// Walk the tree below `root`, starting from its already fetched listing.
///
/// Entries are visited in listing order and every directory is descended into
/// as soon as it is met, one request at a time. A directory whose listing fails
/// is logged and skipped; the walk itself never fails. The order of the result
/// carries no meaning.
pub async fn scan<S, P>(
    source: &S,
    root: &str,
    initial: Vec<DirectoryListing>,
    settings: &LibrarySettings,
    progress: &P,
) -> Vec<DiscoveredFile>
where
    S: ListingSource,
    P: ProgressReporter + ?Sized,
{
    let mut files: Vec<DiscoveredFile> = Vec::new();
    let mut stack = vec![Frame {
        path: root.to_string(),
        entries: initial.into_iter(),
    }];

    while let Some(frame) = stack.last_mut() {
        let Some(item) = frame.entries.next() else {
            stack.pop();
            continue;
        };

        match item.kind {
            EntryKind::File if is_eligible(&item.name, settings) => {
                let Some(fetch_locator) = item.fetch_locator else {
                    warn!(name = %item.name, path = %frame.path, "file has no fetch locator, skipping");
                    continue;
                };
                files.push(DiscoveredFile {
                    fetch_locator,
                    parent_folder_name: last_segment(&frame.path).to_string(),
                    path: frame.path.clone(),
                    name: item.name,
                });
            }
            EntryKind::Directory => {
                let child = join_path(&frame.path, &item.name);
                progress.report(WALK_PERCENT, &format!("Scanning {child}..."));
                match source.list(&child).await {
                    Ok(entries) => {
                        debug!(path = %child, count = entries.len(), "listed directory");
                        stack.push(Frame {
                            path: child,
                            entries: entries.into_iter(),
                        });
                    }
                    Err(e) => {
                        warn!(path = %child, error = %e, "skipping directory");
                    }
                }
            }
            EntryKind::File | EntryKind::Other => {}
        }
    }

    files
}
