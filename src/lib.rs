#[macro_use]
extern crate log;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate async_trait;

/// Recursive operations driven over a flat transport
pub mod client;
mod error;
/// Raw listing dialects and the normalized entry model
pub mod listing;

pub use error::Error;
