//! Infrastructure layer.

pub mod backend;
pub mod storage;

#[cfg(feature = "http")]
pub use self::backend::Rest;
pub use self::{backend::Backend, storage::Storage};
