// Page domain module

#![allow(clippy::module_inception)]

pub mod page;

pub use page::{Page, TITLE_MAX_LENGTH, URL_MAX_LENGTH};
