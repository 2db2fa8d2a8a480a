// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod memory_store;
pub mod postgres_category_repository;
mod postgres_errors;
pub mod postgres_page_repository;
pub mod postgres_user_repository;

pub use memory_store::MemoryStore;
pub use postgres_category_repository::PostgresCategoryRepository;
pub use postgres_page_repository::PostgresPageRepository;
pub use postgres_user_repository::PostgresUserRepository;
