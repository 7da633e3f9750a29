//! Ports - trait seams between the application core and the outside world.

mod change_notifier;
mod event_sink;
mod list_repository;
mod password_hasher;
mod session_validator;
mod todo_repository;
mod user_repository;

pub use change_notifier::ChangeNotifier;
pub use event_sink::EventSink;
pub use list_repository::{ListChanges, ListRepository, NewList};
pub use password_hasher::PasswordHasher;
pub use session_validator::{IssuedToken, SessionValidator, TokenIssuer};
pub use todo_repository::{
    NewTodo, StatusFilter, TodoChanges, TodoFilter, TodoOrder, TodoRepository,
};
pub use user_repository::{NewUser, UserRepository};
