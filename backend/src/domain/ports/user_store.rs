//! Port abstraction for the user document store.
use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user store adapters.
    pub enum UserStoreError {
        /// The store could not be reached.
        Connection { message: String } => "user store connection failed: {message}",
        /// A query or mutation failed while executing.
        Query { message: String } => "user store query failed: {message}",
        /// The operation needs a persisted user but the user has no identifier.
        MissingIdentifier => "user has no identifier",
    }
}

/// Async CRUD over the single user collection.
///
/// Implementations serialise conflicting writes to the same identifier
/// themselves; callers hold no locks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Return every stored user. Ordering is unspecified.
    async fn find_all(&self) -> Result<Vec<User>, UserStoreError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError>;

    /// Insert or fully replace a user, assigning an identifier when absent.
    ///
    /// Returns the user as persisted, always carrying an identifier.
    async fn save(&self, user: User) -> Result<User, UserStoreError>;

    /// Remove the user with `id`. Removing an absent user is not an error.
    async fn delete(&self, id: &UserId) -> Result<(), UserStoreError>;

    /// Remove every user from the collection.
    async fn drop_all(&self) -> Result<(), UserStoreError>;
}
