use serde::Serialize;

/// What a listing entry is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKind {
    File,
    Directory,
    /// Symlinks, submodules and anything else the walker does not follow.
    Other,
}

/// One entry of a directory listing as reported by a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryListing {
    pub kind: EntryKind,
    pub name: String,
    /// Slash-delimited path relative to the source root.
    pub path: String,
    /// Opaque reference the player uses to fetch the bytes. Files only.
    pub fetch_locator: Option<String>,
}

impl DirectoryListing {
    pub fn file(name: impl Into<String>, path: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::File,
            name: name.into(),
            path: path.into(),
            fetch_locator: Some(locator.into()),
        }
    }

    pub fn directory(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Directory,
            name: name.into(),
            path: path.into(),
            fetch_locator: None,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Join a listing path and a child name with `/`, treating an empty parent as the root.
pub fn join_path(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches('/');
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Last segment of a slash-delimited path (`""` for the root).
pub fn last_segment(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or("")
}
