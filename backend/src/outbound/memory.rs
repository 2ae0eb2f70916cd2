//! In-process `UserStore` adapter.
//!
//! Selected with a `memory://` store URL. Users live in a `BTreeMap` behind a
//! `tokio` read/write lock, so concurrent writers to the same identifier are
//! serialised and readers never block the runtime thread.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{User, UserId};

/// Volatile user store; contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<BTreeMap<UserId, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_all(&self) -> Result<Vec<User>, UserStoreError> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, UserStoreError> {
        let (id, user) = match user.id() {
            Some(id) => (id.clone(), user),
            None => {
                let id = UserId::random();
                (id.clone(), user.with_id(id))
            }
        };
        self.users.write().await.insert(id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserStoreError> {
        self.users.write().await.remove(id);
        Ok(())
    }

    async fn drop_all(&self) -> Result<(), UserStoreError> {
        self.users.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Age, Login};
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> MemoryUserStore {
        MemoryUserStore::new()
    }

    fn user(login: &str, age: u32) -> User {
        User::new(Login::new(login).expect("valid login"), Age::new(age))
    }

    #[rstest]
    #[tokio::test]
    async fn save_assigns_fresh_identifiers(store: MemoryUserStore) {
        let first = store.save(user("ala", 18)).await.expect("save");
        let second = store.save(user("ala", 18)).await.expect("save");

        assert!(first.id().is_some());
        assert_ne!(first.id(), second.id());
        assert_eq!(store.find_all().await.expect("list").len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn save_with_an_identifier_replaces(store: MemoryUserStore) {
        let id = UserId::new("abc").expect("valid id");
        store
            .save(user("ala", 18).with_id(id.clone()))
            .await
            .expect("insert");
        store
            .save(user("ola", 19).with_id(id.clone()))
            .await
            .expect("replace");

        let found = store.find_by_id(&id).await.expect("find").expect("present");
        assert_eq!(found.login().as_ref(), "ola");
        assert_eq!(found.age().get(), 19);
        assert_eq!(store.find_all().await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_and_drop_all_remove_users(store: MemoryUserStore) {
        let kept = store.save(user("ala", 18)).await.expect("save");
        let removed = store.save(user("ola", 19)).await.expect("save");
        let removed_id = removed.id().expect("id").clone();

        store.delete(&removed_id).await.expect("delete");
        store.delete(&removed_id).await.expect("deleting twice is fine");
        assert_eq!(store.find_all().await.expect("list"), vec![kept]);

        store.drop_all().await.expect("drop");
        assert!(store.find_all().await.expect("list").is_empty());
    }
}
