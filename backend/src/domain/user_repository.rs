//! Typed façade over the user store.
//!
//! Apart from [`UserRepository::init`] every method passes straight through
//! to the injected [`UserStore`].

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{Age, Login, User, UserId, UserValidationError};

/// Identifier pinned for the `test` seed so clients can address it directly.
pub const SEED_TEST_USER_ID: &str = "5b24f75e5a86a170de98c1e7";

const SEEDS: [(Option<&str>, &str, u32); 3] = [
    (Some(SEED_TEST_USER_ID), "test", 10),
    (None, "ala", 18),
    (None, "admin", 60),
];

fn seed_users() -> Result<Vec<User>, UserValidationError> {
    SEEDS
        .iter()
        .map(|(id, login, age)| {
            let user = User::new(Login::new(*login)?, Age::new(*age));
            match id {
                Some(id) => Ok(user.with_id(UserId::new(*id)?)),
                None => Ok(user),
            }
        })
        .collect()
}

/// Repository for the user collection.
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn UserStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Reset the collection to the three demo users.
    ///
    /// Drops every stored user, saves the seeds, and returns the users read
    /// back afterwards. Running it twice leaves the same three logins.
    ///
    /// # Errors
    /// Returns the first store failure; earlier steps are not rolled back.
    pub async fn init(&self) -> Result<Vec<User>, UserStoreError> {
        let seeds = seed_users()
            .map_err(|err| UserStoreError::query(format!("invalid seed user: {err}")))?;

        self.store.drop_all().await?;
        for seed in seeds {
            self.store.save(seed).await?;
        }

        let users = self.store.find_all().await?;
        for user in &users {
            debug!(user = %user, "seed user stored");
        }
        info!(user_count = users.len(), "user collection initialised");
        Ok(users)
    }

    pub async fn find_all(&self) -> Result<Vec<User>, UserStoreError> {
        self.store.find_all().await
    }

    pub async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError> {
        self.store.find_by_id(id).await
    }

    /// Upsert by identifier; the returned user always carries one.
    pub async fn save(&self, user: User) -> Result<User, UserStoreError> {
        self.store.save(user).await
    }

    /// Delete a persisted user.
    ///
    /// # Errors
    /// [`UserStoreError::MissingIdentifier`] when `user` was never persisted.
    pub async fn delete(&self, user: &User) -> Result<(), UserStoreError> {
        let id = user.id().ok_or_else(UserStoreError::missing_identifier)?;
        self.store.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockUserStore;
    use mockall::Sequence;
    use rstest::rstest;

    #[rstest]
    fn seeds_pin_only_the_test_user() {
        let seeds = seed_users().expect("seeds are valid");
        let ids: Vec<Option<&str>> = seeds.iter().map(|u| u.id().map(AsRef::as_ref)).collect();
        assert_eq!(ids, vec![Some(SEED_TEST_USER_ID), None, None]);
    }

    #[rstest]
    #[tokio::test]
    async fn init_drops_before_saving_seeds() {
        let mut store = MockUserStore::new();
        let mut seq = Sequence::new();
        store
            .expect_drop_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        store
            .expect_save()
            .times(3)
            .in_sequence(&mut seq)
            .returning(|user| Ok(user.clone().with_id(UserId::random())));
        store
            .expect_find_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(Vec::new()));

        let repository = UserRepository::new(Arc::new(store));
        repository.init().await.expect("init succeeds");
    }

    #[rstest]
    #[tokio::test]
    async fn init_stops_when_drop_fails() {
        let mut store = MockUserStore::new();
        store
            .expect_drop_all()
            .returning(|| Err(UserStoreError::connection("refused")));
        store.expect_save().never();

        let repository = UserRepository::new(Arc::new(store));
        let err = repository.init().await.expect_err("drop failure propagates");
        assert_eq!(err, UserStoreError::connection("refused"));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_requires_an_identifier() {
        let mut store = MockUserStore::new();
        store.expect_delete().never();

        let repository = UserRepository::new(Arc::new(store));
        let user = User::new(Login::new("ala").expect("valid login"), Age::new(18));
        let err = repository.delete(&user).await.expect_err("unsaved user");
        assert_eq!(err, UserStoreError::MissingIdentifier);
    }
}
