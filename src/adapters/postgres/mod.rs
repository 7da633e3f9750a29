//! PostgreSQL adapters - sqlx implementations of the repository ports.

mod list_repository;
mod todo_repository;
mod user_repository;

pub use list_repository::PostgresListRepository;
pub use todo_repository::PostgresTodoRepository;
pub use user_repository::PostgresUserRepository;
