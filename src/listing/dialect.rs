use crate::error::Error;

/// One of the two recognized raw-listing line grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Long format opening with a permission string, `drwxr-xr-x ...`
    Unix,
    /// Short format opening with a date, `09-15-20  02:00PM ...`
    Windows,
}

impl Dialect {
    /// Heuristic detection from a line's first token.
    ///
    /// A decimal digit anywhere in the token marks a Windows date; a Unix
    /// type character marks a permission string. Anything else is reported
    /// as [`Error::UnsupportedDialect`]; callers fall back to a Unix parse
    /// attempt rather than aborting the listing.
    pub fn detect(first_token: &str) -> Result<Self, Error> {
        if first_token.bytes().any(|b| b.is_ascii_digit()) {
            return Ok(Self::Windows);
        }

        match first_token.as_bytes().first() {
            Some(b'-' | b'd' | b'l' | b'b' | b'c' | b'p' | b's') => Ok(Self::Unix),
            _ => Err(Error::UnsupportedDialect(first_token.to_string())),
        }
    }
}
