use chrono::NaiveDateTime;

use super::{
    entry::{Entry, EntryKind, Modified},
    tokens::{self, WINDOWS_LEAD},
};
use crate::error::Error;

/// Stamp layout used by Windows-style listings, `09-15-20 02:00PM`.
const STAMP_FORMAT: &str = "%m-%d-%y %I:%M%p";

/// Parses one Windows short-format line.
///
/// Expects (date, time, size-or-`<DIR>`, name...). A `<DIR>` size token
/// makes a directory with no size; anything else is a file. The dialect
/// carries no link concept, so `target` is never set. Lines whose stamp
/// does not parse are treated as malformed and skipped by callers.
pub fn parse(line: &str) -> Result<Entry, Error> {
    let tokens = tokens::tokenize(line, WINDOWS_LEAD);
    if tokens.len() < WINDOWS_LEAD {
        return Err(Error::MalformedLine(line.to_string()));
    }

    let stamp = format!("{} {}", tokens[0], tokens[1]);
    let timestamp = NaiveDateTime::parse_from_str(&stamp, STAMP_FORMAT)
        .map_err(|_| Error::MalformedLine(line.to_string()))?;

    let (kind, size) = if tokens[2] == "<DIR>" {
        (EntryKind::Directory, None)
    } else {
        (EntryKind::File, tokens[2].parse().ok())
    };

    let mut date_parts = tokens[0].split('-');
    let month = date_parts.next().map(str::to_string);
    let day = date_parts.next().map(str::to_string);

    Ok(Entry {
        name: tokens.get(WINDOWS_LEAD).copied().unwrap_or_default().to_string(),
        kind,
        size,
        modified: Modified {
            month,
            day,
            time: Some(tokens[1].to_string()),
        },
        target: None,
        permissions: None,
        links: None,
        owner: None,
        group: None,
        raw_date: Some(tokens[0].to_string()),
        timestamp: Some(timestamp),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn dir_marker_makes_directory_without_size() {
        let entry = parse("09-15-20  02:00PM  <DIR> vendor").unwrap();
        assert_eq!(entry.kind, EntryKind::Directory);
        assert_eq!(entry.size, None);
        assert_eq!(entry.name, "vendor");
        assert_eq!(entry.target, None);
    }

    #[test]
    fn plain_size_makes_file() {
        let entry = parse("09-15-20  02:00PM  1024 report.txt").unwrap();
        assert_eq!(entry.kind, EntryKind::File);
        assert_eq!(entry.size, Some(1024));
        assert_eq!(entry.raw_date.as_deref(), Some("09-15-20"));
    }

    #[test]
    fn stamp_parses_into_full_timestamp() {
        let entry = parse("09-15-20  02:00PM  <DIR> vendor").unwrap();
        let stamp = entry.timestamp.unwrap();
        assert_eq!((stamp.month(), stamp.day(), stamp.hour()), (9, 15, 14));
        assert_eq!(entry.modified.month.as_deref(), Some("09"));
        assert_eq!(entry.modified.day.as_deref(), Some("15"));
        assert_eq!(entry.modified.time.as_deref(), Some("02:00PM"));
    }

    #[test]
    fn name_keeps_embedded_spaces() {
        let entry = parse("09-15-20  02:00PM  99 annual  report 2020.xlsx").unwrap();
        assert_eq!(entry.name, "annual  report 2020.xlsx");
    }

    #[test]
    fn unparsable_stamp_is_malformed() {
        assert!(matches!(
            parse("99-99-99  61:00XM  <DIR> broken"),
            Err(Error::MalformedLine(_))
        ));
    }

    #[test]
    fn too_few_tokens_is_malformed() {
        assert!(matches!(parse("09-15-20"), Err(Error::MalformedLine(_))));
    }
}
