use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of one remote object, taken from the listing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
    Link,
    /// Anything the permission string does not identify
    Unknown,
}

impl EntryKind {
    /// Classifies a Unix permission string by its leading character.
    #[must_use]
    pub fn classify(permissions: &str) -> Self {
        Self::from_permission_char(permissions.chars().next())
    }

    /// Maps a permission string's type character.
    /// `-` is a file, `d` a directory, `l` a link; anything else,
    /// including an absent character, is unknown.
    #[must_use]
    pub const fn from_permission_char(c: Option<char>) -> Self {
        match c {
            Some('-') => Self::File,
            Some('d') => Self::Directory,
            Some('l') => Self::Link,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
            Self::Link => "link",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unix mode bits recovered from the symbolic permission string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions(u16);

bitflags! {
    impl Permissions: u16 {
        const OWNER_READ = 0o400;
        const OWNER_WRITE = 0o200;
        const OWNER_EXEC = 0o100;
        const GROUP_READ = 0o040;
        const GROUP_WRITE = 0o020;
        const GROUP_EXEC = 0o010;
        const OTHER_READ = 0o004;
        const OTHER_WRITE = 0o002;
        const OTHER_EXEC = 0o001;
    }
}

impl Permissions {
    /// Parses the nine `rwx` characters that follow the type character in a
    /// listing permission string. Returns `None` if the string is too short.
    #[must_use]
    pub fn from_symbolic(s: &str) -> Option<Self> {
        let rest = s.get(1..10)?;
        if rest.chars().count() != 9 {
            return None;
        }

        let mut bits = 0u16;
        for (i, c) in rest.chars().enumerate() {
            if c != '-' {
                bits |= 1u16 << (8 - i);
            }
        }

        Some(Self::from_bits_truncate(bits))
    }
}

/// Partial modification timestamp carried by a listing line.
///
/// Neither dialect reliably reports a year (the Unix time-or-year column is
/// kept as-is in `time`), so no full date is guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modified {
    pub month: Option<String>,
    pub day: Option<String>,
    pub time: Option<String>,
}

/// One normalized record parsed from a raw listing line.
///
/// Built exhaustively by the dialect parsers and immutable afterwards.
/// `target` is set if and only if `kind` is [`EntryKind::Link`] and the raw
/// name contained a `->` separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Base name of the item, never `.` or `..` once filtered by callers
    pub name: String,
    pub kind: EntryKind,
    /// Size in bytes; absent for directories reported without one
    pub size: Option<u64>,
    pub modified: Modified,
    /// Link destination, only for arrow-carrying link entries
    pub target: Option<String>,
    /// Unix dialect metadata
    pub permissions: Option<String>,
    pub links: Option<u32>,
    pub owner: Option<String>,
    pub group: Option<String>,
    /// Windows dialect metadata
    pub raw_date: Option<String>,
    pub timestamp: Option<NaiveDateTime>,
}

impl Entry {
    /// Mode bits decoded from the Unix permission string, when present.
    #[must_use]
    pub fn permission_bits(&self) -> Option<Permissions> {
        self.permissions.as_deref().and_then(Permissions::from_symbolic)
    }
}
