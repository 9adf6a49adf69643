//! Read entities definitions.
//!
//! Only the fields the client actually reads are modeled, everything else
//! the backend sends is ignored.

pub mod dashboard;
pub mod rating;
pub mod store;
pub mod user;

pub use self::rating::Review;
