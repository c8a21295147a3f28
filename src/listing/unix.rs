use super::{
    entry::{Entry, EntryKind, Modified},
    tokens::{self, UNIX_LEAD},
};
use crate::error::Error;

/// Parses one Unix long-format line.
///
/// Expects at least the 8 fixed leading tokens (permissions, link count,
/// owner, group, size, month, day, time-or-year); everything after them is
/// the name, kept verbatim. Link names are split on the first `->` into name
/// and target. Shorter lines are [`Error::MalformedLine`], which callers
/// skip rather than letting one line fail the whole listing.
pub fn parse(line: &str) -> Result<Entry, Error> {
    let tokens = tokens::tokenize(line, UNIX_LEAD);
    if tokens.len() < UNIX_LEAD {
        return Err(Error::MalformedLine(line.to_string()));
    }

    let permissions = tokens[0];
    let kind = EntryKind::classify(permissions);

    let mut name = tokens.get(UNIX_LEAD).copied().unwrap_or_default().to_string();
    let mut target = None;

    if kind == EntryKind::Link {
        if let Some((left, right)) = name.split_once("->") {
            let (left, right) = (left.trim(), right.trim());
            target = Some(right.to_string());
            name = left.to_string();
        }
    }

    Ok(Entry {
        name,
        kind,
        size: tokens[4].parse().ok(),
        modified: Modified {
            month: Some(tokens[5].to_string()),
            day: Some(tokens[6].to_string()),
            time: Some(tokens[7].to_string()),
        },
        target,
        permissions: Some(permissions.to_string()),
        links: tokens[1].parse().ok(),
        owner: Some(tokens[2].to_string()),
        group: Some(tokens[3].to_string()),
        raw_date: None,
        timestamp: None,
    })
}
