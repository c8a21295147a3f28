use crate::error::Error;

/// Flat, non-recursive view of a remote session.
///
/// Implementations wrap an established control connection; connection setup,
/// authentication, transfer modes and byte transfer stay on their side of
/// this seam, as do timeouts and cancellation. The current working directory
/// is session-wide mutable state on the remote end, which is why every
/// operation in this crate that changes it restores it before returning.
#[async_trait]
pub trait Transport: Send {
    /// Flat name listing of `path`. An empty `path` lists the current
    /// remote directory. Must fail with [`Error::ListingUnavailable`]
    /// rather than return an empty success on transport failure.
    async fn list_names(&mut self, path: &str) -> Result<Vec<String>, Error>;

    /// Raw dialect-specific listing lines of `path`, same contract as
    /// [`Transport::list_names`].
    async fn list_raw_lines(&mut self, path: &str) -> Result<Vec<String>, Error>;

    /// Changes the remote working directory, `false` on refusal.
    async fn change_directory(&mut self, path: &str) -> bool;

    /// Current remote working directory; fails with
    /// [`Error::PathResolution`] when the query itself fails.
    async fn current_directory(&mut self) -> Result<String, Error>;

    async fn create_directory(&mut self, path: &str) -> bool;

    async fn delete_file(&mut self, path: &str) -> bool;

    /// Removes an empty directory, `false` on refusal.
    async fn remove_directory(&mut self, path: &str) -> bool;
}
