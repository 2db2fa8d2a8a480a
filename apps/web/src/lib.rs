//! Rango web application library
//!
//! Category and page listings, submission forms, and user accounts,
//! built as request handlers over persistence, presentation and
//! authentication collaborators.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod forms;
pub mod infrastructure;
pub mod presentation;
