// Infrastructure layer module
// Contains database adapters and file storage
// Follows Hexagonal Architecture

pub mod database;
pub mod media;
pub mod repositories;
