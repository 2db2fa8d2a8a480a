// Domain layer module exports
// Domain is independent of infrastructure concerns

pub mod category;
pub mod page;
pub mod repositories;
pub mod user;
