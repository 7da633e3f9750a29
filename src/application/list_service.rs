//! List service - CRUD over a user's todo lists.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::domain::list::TodoList;
use crate::domain::todo::TodoItem;
use crate::ports::{ListChanges, ListRepository, NewList, TodoFilter, TodoRepository};

/// A list together with the todos it contains.
#[derive(Debug, Clone)]
pub struct ListWithTodos {
    pub list: TodoList,
    pub todos: Vec<TodoItem>,
}

/// Application service for todo lists.
pub struct ListService {
    lists: Arc<dyn ListRepository>,
    todos: Arc<dyn TodoRepository>,
}

impl ListService {
    pub fn new(lists: Arc<dyn ListRepository>, todos: Arc<dyn TodoRepository>) -> Self {
        Self { lists, todos }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        list: NewList,
    ) -> Result<TodoList, DomainError> {
        if list.title.trim().is_empty() {
            return Err(DomainError::validation("List title must not be empty"));
        }
        self.lists.insert(user.id, list).await
    }

    /// Fetches one list with its todos.
    pub async fn get(
        &self,
        user: &AuthenticatedUser,
        list_id: i64,
    ) -> Result<ListWithTodos, DomainError> {
        let list = self.require(user, list_id).await?;
        let todos = self.todos_in(user, list_id).await?;
        Ok(ListWithTodos { list, todos })
    }

    /// Fetches all of a user's lists, each with its todos.
    pub async fn get_all(&self, user: &AuthenticatedUser) -> Result<Vec<ListWithTodos>, DomainError> {
        let lists = self.lists.find_all(user.id).await?;
        let mut out = Vec::with_capacity(lists.len());
        for list in lists {
            let todos = self.todos_in(user, list.id).await?;
            out.push(ListWithTodos { list, todos });
        }
        Ok(out)
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        list_id: i64,
        changes: ListChanges,
    ) -> Result<TodoList, DomainError> {
        if changes.is_empty() {
            return Err(DomainError::validation("No fields to update"));
        }
        self.lists
            .update(list_id, user.id, changes)
            .await?
            .ok_or_else(|| Self::not_found(list_id))
    }

    pub async fn delete(&self, user: &AuthenticatedUser, list_id: i64) -> Result<(), DomainError> {
        if !self.lists.delete(list_id, user.id).await? {
            return Err(Self::not_found(list_id));
        }
        Ok(())
    }

    async fn require(
        &self,
        user: &AuthenticatedUser,
        list_id: i64,
    ) -> Result<TodoList, DomainError> {
        self.lists
            .find_by_id(list_id, user.id)
            .await?
            .ok_or_else(|| Self::not_found(list_id))
    }

    async fn todos_in(
        &self,
        user: &AuthenticatedUser,
        list_id: i64,
    ) -> Result<Vec<TodoItem>, DomainError> {
        let filter = TodoFilter {
            list_id: Some(list_id),
            ..Default::default()
        };
        self.todos.find_all(user.id, &filter).await
    }

    fn not_found(list_id: i64) -> DomainError {
        DomainError::not_found(format!("TodoList with id {} not found", list_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use uuid::Uuid;

    use crate::domain::foundation::ErrorCode;
    use crate::ports::{NewTodo, TodoChanges};

    struct InMemoryLists {
        lists: Mutex<Vec<TodoList>>,
        next_id: Mutex<i64>,
    }

    impl InMemoryLists {
        fn new() -> Self {
            Self {
                lists: Mutex::new(Vec::new()),
                next_id: Mutex::new(1),
            }
        }
    }

    #[async_trait]
    impl ListRepository for InMemoryLists {
        async fn insert(&self, user_id: Uuid, list: NewList) -> Result<TodoList, DomainError> {
            let mut next_id = self.next_id.lock().unwrap();
            let row = TodoList {
                id: *next_id,
                title: list.title,
                description: list.description,
                user_id,
            };
            *next_id += 1;
            self.lists.lock().unwrap().push(row.clone());
            Ok(row)
        }

        async fn find_by_id(
            &self,
            list_id: i64,
            user_id: Uuid,
        ) -> Result<Option<TodoList>, DomainError> {
            Ok(self
                .lists
                .lock()
                .unwrap()
                .iter()
                .find(|l| l.id == list_id && l.user_id == user_id)
                .cloned())
        }

        async fn find_all(&self, user_id: Uuid) -> Result<Vec<TodoList>, DomainError> {
            Ok(self
                .lists
                .lock()
                .unwrap()
                .iter()
                .filter(|l| l.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn update(
            &self,
            list_id: i64,
            user_id: Uuid,
            changes: ListChanges,
        ) -> Result<Option<TodoList>, DomainError> {
            let mut lists = self.lists.lock().unwrap();
            let Some(list) = lists
                .iter_mut()
                .find(|l| l.id == list_id && l.user_id == user_id)
            else {
                return Ok(None);
            };
            if let Some(title) = changes.title {
                list.title = title;
            }
            if let Some(description) = changes.description {
                list.description = Some(description);
            }
            Ok(Some(list.clone()))
        }

        async fn delete(&self, list_id: i64, user_id: Uuid) -> Result<bool, DomainError> {
            let mut lists = self.lists.lock().unwrap();
            let before = lists.len();
            lists.retain(|l| !(l.id == list_id && l.user_id == user_id));
            Ok(lists.len() < before)
        }
    }

    struct NoTodos;

    #[async_trait]
    impl TodoRepository for NoTodos {
        async fn insert(&self, _user_id: Uuid, _todo: NewTodo) -> Result<TodoItem, DomainError> {
            unimplemented!("not used in these tests")
        }

        async fn find_by_id(
            &self,
            _todo_id: i64,
            _user_id: Uuid,
        ) -> Result<Option<TodoItem>, DomainError> {
            unimplemented!("not used in these tests")
        }

        async fn find_all(
            &self,
            _user_id: Uuid,
            _filter: &TodoFilter,
        ) -> Result<Vec<TodoItem>, DomainError> {
            Ok(Vec::new())
        }

        async fn update(
            &self,
            _todo_id: i64,
            _user_id: Uuid,
            _changes: TodoChanges,
        ) -> Result<Option<TodoItem>, DomainError> {
            unimplemented!("not used in these tests")
        }

        async fn delete(&self, _todo_id: i64, _user_id: Uuid) -> Result<bool, DomainError> {
            unimplemented!("not used in these tests")
        }
    }

    fn setup() -> (ListService, AuthenticatedUser) {
        let user = AuthenticatedUser::new(Uuid::new_v4(), "alice", "a@example.com", None);
        let service = ListService::new(Arc::new(InMemoryLists::new()), Arc::new(NoTodos));
        (service, user)
    }

    fn new_list(title: &str) -> NewList {
        NewList {
            title: title.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let (service, user) = setup();
        let created = service.create(&user, new_list("groceries")).await.unwrap();

        let fetched = service.get(&user, created.id).await.unwrap();
        assert_eq!(fetched.list, created);
        assert!(fetched.todos.is_empty());
    }

    #[tokio::test]
    async fn lists_are_scoped_to_their_owner() {
        let (service, user) = setup();
        let created = service.create(&user, new_list("groceries")).await.unwrap();

        let stranger = AuthenticatedUser::new(Uuid::new_v4(), "bob", "b@example.com", None);
        let result = service.get(&stranger, created.id).await;
        assert_eq!(result.unwrap_err().code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn empty_title_rejected() {
        let (service, user) = setup();
        let result = service.create(&user, new_list("  ")).await;
        assert_eq!(result.unwrap_err().code(), ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn update_missing_list_is_not_found() {
        let (service, user) = setup();
        let result = service
            .update(
                &user,
                404,
                ListChanges {
                    title: Some("renamed".to_string()),
                    description: None,
                },
            )
            .await;
        assert_eq!(result.unwrap_err().code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn delete_removes_the_list() {
        let (service, user) = setup();
        let created = service.create(&user, new_list("groceries")).await.unwrap();

        service.delete(&user, created.id).await.unwrap();
        assert!(service.get(&user, created.id).await.is_err());
    }
}
