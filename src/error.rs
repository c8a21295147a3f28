use thiserror::Error;

/// Failure kinds surfaced by listing and traversal operations.
///
/// Listing-level failures abort the enclosing call. Per-line problems
/// ([`Error::MalformedLine`], [`Error::UnsupportedDialect`]) are recovered
/// locally by skipping the offending line and never abort a whole listing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The transport returned no data for a listing request
    #[error("listing unavailable for `{0}`")]
    ListingUnavailable(String),
    /// A path expected to denote a directory failed the change-directory probe
    #[error("`{0}` is not a directory")]
    NotADirectory(String),
    /// A raw line carried fewer tokens than its dialect's minimum
    #[error("malformed listing line `{0}`")]
    MalformedLine(String),
    /// The first token matched neither known listing dialect
    #[error("unrecognized listing dialect in token `{0}`")]
    UnsupportedDialect(String),
    /// The current remote directory could not be resolved
    #[error("current remote directory could not be resolved")]
    PathResolution,
}
