//! Raw listing text handling.
//!
//! A listing line has no fixed grammar; at minimum the Unix long format and
//! the Windows short format must be recognized and mapped onto one
//! normalized [`Entry`] shape. Detection is a first-token heuristic, so a
//! line that matches neither dialect is still fed to the Unix parser as a
//! best effort instead of failing the listing.

mod dialect;
mod entry;
mod path;
mod tokens;
mod unix;
mod windows;

use std::collections::HashMap;

pub use dialect::Dialect;
pub use entry::{Entry, EntryKind, Modified, Permissions};
pub use path::{base_name, is_sentinel, join, ListingKey};
pub use tokens::{tokenize, UNIX_LEAD, WINDOWS_LEAD};

use crate::error::Error;

/// Parses one raw listing line into a normalized entry.
///
/// Empty lines and lines with fewer tokens than their dialect's minimum are
/// [`Error::MalformedLine`]; the policy everywhere is to skip such lines,
/// never to abort the listing that carried them.
pub fn parse_line(line: &str) -> Result<Entry, Error> {
    let Some(first) = line.split_whitespace().next() else {
        return Err(Error::MalformedLine(line.to_string()));
    };

    match Dialect::detect(first) {
        Ok(Dialect::Windows) => windows::parse(line),
        Ok(Dialect::Unix) => unix::parse(line),
        Err(err) => {
            debug!("{err}, attempting Unix parse");
            unix::parse(line)
        }
    }
}

/// Parses raw listing lines into entries keyed by `type#path`.
///
/// A lone token ending in `:` is a multi-directory header, emitted when
/// listings of several rooted paths are concatenated; it updates the path
/// prefix applied to every following entry until the next header. Sentinel
/// entries and malformed lines are dropped, and an already-present key is
/// never overwritten.
pub fn parse_raw_lines<I, S>(lines: I) -> HashMap<ListingKey, Entry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut items = HashMap::new();
    let mut prefix = String::new();

    for line in lines {
        let line = line.as_ref();
        let tokens = tokenize(line, 1);

        if tokens.is_empty() {
            continue;
        }

        if tokens.len() == 1 && tokens[0].len() > 1 && tokens[0].ends_with(':') {
            let header = tokens[0].trim_end_matches(':');
            prefix = header.strip_prefix("./").unwrap_or(header).to_string();
            continue;
        }

        match parse_line(line) {
            Ok(entry) => {
                if entry.name.is_empty() || is_sentinel(&entry.name) {
                    continue;
                }

                let key = ListingKey::new(entry.kind, join(&prefix, &entry.name));
                let _ = items.entry(key).or_insert(entry);
            }
            Err(err) => debug!("skipping listing line: {err}"),
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_route_to_the_matching_dialect() {
        let unix = parse_line("drwxr-xr-x 2 user group 4096 Sep 15 15:18 docs").unwrap();
        assert_eq!(unix.kind, EntryKind::Directory);

        let windows = parse_line("09-15-20  02:00PM  <DIR> vendor").unwrap();
        assert_eq!(windows.kind, EntryKind::Directory);
        assert_eq!(windows.size, None);
    }

    #[test]
    fn empty_line_is_malformed() {
        assert!(matches!(parse_line(""), Err(Error::MalformedLine(_))));
    }

    #[test]
    fn raw_lines_parse_into_keyed_entries() {
        let items = parse_raw_lines([
            "drwxr-xr-x 2 user group 4096 Sep 15 15:18 .",
            "drwxr-xr-x 4 user group 4096 Sep 15 15:18 ..",
            "drwxr-xr-x 2 user group 4096 Sep 15 15:18 docs",
            "-rw-r--r-- 1 user group 120 Sep 15 15:18 readme.md",
            "lrwxrwxrwx 1 user group 7 Sep 15 15:18 latest -> readme.md",
        ]);

        assert_eq!(items.len(), 3);
        let key = ListingKey::new(EntryKind::Link, "latest");
        assert_eq!(items[&key].target.as_deref(), Some("readme.md"));
        assert!(items.keys().all(|k| !is_sentinel(base_name(&k.path))));
    }

    #[test]
    fn header_lines_reroot_following_entries() {
        let items = parse_raw_lines([
            "-rw-r--r-- 1 user group 10 Sep 15 15:18 top.txt",
            "./docs:",
            "-rw-r--r-- 1 user group 20 Sep 15 15:18 guide.md",
        ]);

        assert!(items.contains_key(&ListingKey::new(EntryKind::File, "top.txt")));
        assert!(items.contains_key(&ListingKey::new(EntryKind::File, "docs/guide.md")));
    }

    #[test]
    fn malformed_lines_are_skipped_not_fatal() {
        let items = parse_raw_lines([
            "total 8",
            "-rw-r--r-- 1 user group 10 Sep 15 15:18 kept.txt",
        ]);

        assert_eq!(items.len(), 1);
    }

    #[test]
    fn duplicate_keys_keep_the_first_entry() {
        let items = parse_raw_lines([
            "-rw-r--r-- 1 user group 10 Sep 15 15:18 twice.txt",
            "-rw-r--r-- 1 user group 99 Sep 15 15:18 twice.txt",
        ]);

        let key = ListingKey::new(EntryKind::File, "twice.txt");
        assert_eq!(items[&key].size, Some(10));
    }
}
