// User domain module
// Contains the account entities and their value objects

#![allow(clippy::module_inception)]

pub mod user;
pub mod value_objects;

pub use user::{User, UserProfile, UserSummary};
pub use value_objects::{Email, Username};
