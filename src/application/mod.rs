//! Application services - use-case orchestration over the ports.

mod list_service;
mod todo_service;
mod user_service;

pub use list_service::{ListService, ListWithTodos};
pub use todo_service::TodoService;
pub use user_service::{Registration, UserService};
