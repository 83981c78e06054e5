//! Client-facing projections of the stored records.

mod user;

pub use user::{Profile, UserInfo};
