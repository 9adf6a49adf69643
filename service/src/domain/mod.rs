//! Domain definitions.

pub mod field;
pub mod rating;
pub mod store;
pub mod user;

pub use self::user::User;
