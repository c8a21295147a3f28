use serde::{Deserialize, Serialize};
use std::fmt;

use super::entry::EntryKind;

/// Composite identifier `type#path` used to deduplicate and index entries
/// across recursive merges.
///
/// Construction drops any trailing ` -> target` fragment from the path
/// portion so link entries key on the link itself, not its destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingKey {
    pub kind: EntryKind,
    pub path: String,
}

impl ListingKey {
    pub fn new<P: Into<String>>(kind: EntryKind, path: P) -> Self {
        let mut path = path.into();
        if let Some(at) = path.find(" -> ") {
            path.truncate(at);
        }
        Self { kind, path }
    }
}

impl fmt::Display for ListingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.path)
    }
}

/// Returns `true` for the `.`/`..` self and parent references, which are
/// excluded from every result set.
#[must_use]
pub fn is_sentinel(name: &str) -> bool {
    name == "." || name == ".."
}

/// Joins a base directory and entry name with a single separator, then
/// strips a redundant leading `./` so recursive results stay relative.
#[must_use]
pub fn join(base: &str, name: &str) -> String {
    let joined = if base.is_empty() {
        name.to_string()
    } else {
        format!("{base}/{name}")
    };

    match joined.strip_prefix("./") {
        Some(stripped) => stripped.to_string(),
        None => joined,
    }
}

/// Final path segment.
#[must_use]
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_strips_current_directory_prefix() {
        assert_eq!(join(".", "notes.txt"), "notes.txt");
        assert_eq!(join("pub", "notes.txt"), "pub/notes.txt");
        assert_eq!(join("", "notes.txt"), "notes.txt");
        assert_eq!(join("./pub", "notes.txt"), "pub/notes.txt");
    }

    #[test]
    fn sentinels_are_dot_and_dotdot_only() {
        assert!(is_sentinel("."));
        assert!(is_sentinel(".."));
        assert!(!is_sentinel(".hidden"));
        assert!(!is_sentinel("..."));
    }

    #[test]
    fn key_drops_arrow_fragment() {
        let key = ListingKey::new(EntryKind::Link, "pub/link.txt -> target.txt");
        assert_eq!(key.path, "pub/link.txt");
        assert_eq!(key.to_string(), "link#pub/link.txt");
    }

    #[test]
    fn base_name_is_last_segment() {
        assert_eq!(base_name("pub/docs/guide.md"), "guide.md");
        assert_eq!(base_name("guide.md"), "guide.md");
    }
}
