// Repository ports
// Implementations live in the infrastructure layer

pub mod category_repository;
pub mod errors;
pub mod page_repository;
pub mod user_repository;

pub use category_repository::CategoryRepository;
pub use errors::{RepositoryError, RepositoryResult};
pub use page_repository::PageRepository;
pub use user_repository::UserRepository;
