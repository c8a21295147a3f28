//! Remote traversal built from flat listing calls.
//!
//! The underlying protocol enumerates one directory level at a time, so the
//! tree-wide operations here (recursive listing, size, count, removal) are
//! assembled from repeated single-level requests against a [`Transport`].
//! Every call is issued and awaited in sequence; recursion depth never
//! exceeds remote directory depth because traversal is stack-iterative.

mod session;
mod transport;

pub use session::{NameOrder, TreeSession};
pub use transport::Transport;
