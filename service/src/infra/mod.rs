//! Infrastructure implementations.

pub mod gateway;
pub mod storage;

pub use self::{gateway::Gateway, storage::Storage};
