//! Read models of remote resources.

pub mod user;
