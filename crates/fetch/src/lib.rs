//! Download of the system software support page and lookup of the latest
//! release it announces.

pub mod error;
mod fetcher;
mod hardware;

pub use crate::fetcher::{DEFAULT_BASE_URL, Fetcher, support_url};
pub use crate::hardware::{HardwareLine, Locale};
