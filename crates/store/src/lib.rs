//! SQLite record store of discovered releases.
//!
//! # Layout
//! One table per hardware line, named after its lower-case identifier
//! (`ps4`, `ps5`), each with the columns `pubtimestamp INTEGER`,
//! `pubdate TEXT` and `version TEXT`. The version label is the natural key:
//! a release is recorded the first time its label is seen and never again,
//! which is enforced by an existence check in the same transaction as the
//! insert rather than by a constraint.
//!
//! Table names only ever come from [`HardwareLine`], never from user text.

mod db;
pub mod error;
mod models;
mod repo;
mod sql;

pub use crate::db::Database;
pub use crate::repo::Repository;
use psfeed_extract::models as extract;
pub use psfeed_fetch::HardwareLine;

pub(crate) type Release = extract::Release;
