//! [`Storage`]-related implementations.
//!
//! A [`Storage`] persists the raw token of the current session between
//! process restarts. It holds at most one token, keyed by the single
//! well-known [`Slot`], and never inspects the token's contents: shape
//! validation happens in the codec after loading.

pub mod file;

use derive_more::{Display, Error as StdError, From};

pub use self::file::File;

/// Session persistence operation.
pub use common::Handler as Storage;

/// Well-known single slot the current session token is persisted under.
///
/// One session per client installation: saving always overwrites whatever
/// the [`Slot`] held before.
#[derive(Clone, Copy, Debug)]
pub struct Slot;

/// [`Storage`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`File`] storage error.
    File(file::Error),
}
