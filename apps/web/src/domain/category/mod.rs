// Category domain module
// Contains the category entity and slug derivation

#![allow(clippy::module_inception)]

pub mod category;
pub mod slug;

pub use category::Category;
pub use slug::slugify;
