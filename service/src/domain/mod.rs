//! Domain definitions.

pub mod user;

pub use self::user::{Identity, Role, Username};
