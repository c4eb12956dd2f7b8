//! User repository contract and an in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::{AppError, AppResult};
use domain::{Email, User, UserEvent, UserId, UserRecord, Username};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Implementations hydrate through [`User::reconstruct`], so loaded users
/// never carry pending events. Domain errors are propagated unchanged.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find user by normalized email address
    async fn find_by_email(&self, email: &Email) -> AppResult<Option<User>>;

    /// Find user by username (case-insensitive)
    async fn find_by_username(&self, username: &Username) -> AppResult<Option<User>>;

    /// Insert or update the user's current state and append its recorded
    /// events to the user's outbox in the same write.
    ///
    /// Fails with `Conflict` if another account already holds the email or username.
    async fn save(&self, user: &User) -> AppResult<()>;

    /// Outbox events not yet acknowledged as published, oldest first
    async fn pending_events(&self, id: UserId) -> AppResult<Vec<UserEvent>>;

    /// Drop the oldest `count` outbox events after they were published
    async fn mark_published(&self, id: UserId, count: usize) -> AppResult<()>;

    /// Permanently remove a user and its outbox
    async fn delete(&self, id: UserId) -> AppResult<()>;
}

#[derive(Debug, Default)]
struct Tables {
    records: HashMap<UserId, UserRecord>,
    outbox: HashMap<UserId, Vec<UserEvent>>,
}

/// Repository keeping user records and their outbox in process memory.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    tables: RwLock<Tables>,
}

impl InMemoryUserStore {
    /// Create new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.tables.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tables.read().await.records.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.records.get(&id).cloned().map(User::reconstruct))
    }

    async fn find_by_email(&self, email: &Email) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .records
            .values()
            .find(|r| &r.email == email)
            .cloned()
            .map(User::reconstruct))
    }

    async fn find_by_username(&self, username: &Username) -> AppResult<Option<User>> {
        let canonical = username.canonical();
        let tables = self.tables.read().await;
        Ok(tables
            .records
            .values()
            .find(|r| r.username.canonical() == canonical)
            .cloned()
            .map(User::reconstruct))
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        let record = user.to_record();
        let canonical = record.username.canonical();
        let mut tables = self.tables.write().await;

        for other in tables.records.values().filter(|r| r.id != record.id) {
            if other.email == record.email {
                return Err(AppError::conflict("Email"));
            }
            if other.username.canonical() == canonical {
                return Err(AppError::conflict("Username"));
            }
        }

        if !user.events().is_empty() {
            tables
                .outbox
                .entry(record.id)
                .or_default()
                .extend_from_slice(user.events());
        }

        tracing::debug!(user_id = %record.id, status = %record.status, "User saved");
        tables.records.insert(record.id, record);
        Ok(())
    }

    async fn pending_events(&self, id: UserId) -> AppResult<Vec<UserEvent>> {
        let tables = self.tables.read().await;
        Ok(tables.outbox.get(&id).cloned().unwrap_or_default())
    }

    async fn mark_published(&self, id: UserId, count: usize) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if let Some(pending) = tables.outbox.get_mut(&id) {
            pending.drain(..count.min(pending.len()));
            if pending.is_empty() {
                tables.outbox.remove(&id);
            }
        }
        Ok(())
    }

    async fn delete(&self, id: UserId) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        tables.outbox.remove(&id);
        tables.records.remove(&id).map(|_| ()).ok_or(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::PasswordHash;

    fn user(email: &str, username: &str) -> User {
        let hash = PasswordHash::parse("$argon2id$v=19$m=65536,t=2,p=4$c2FsdA$a2V5").unwrap();
        User::create(Email::new(email).unwrap(), Username::new(username).unwrap(), hash).unwrap()
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let store = InMemoryUserStore::new();
        let user = user("a@example.com", "alice");
        store.save(&user).await.unwrap();

        let by_id = store.find_by_id(user.id()).await.unwrap().unwrap();
        assert_eq!(by_id.to_record(), user.to_record());
        assert!(by_id.events().is_empty());

        let by_email = store
            .find_by_email(&Email::new("A@Example.com").unwrap())
            .await
            .unwrap();
        assert_eq!(by_email.map(|u| u.id()), Some(user.id()));

        let by_username = store
            .find_by_username(&Username::new("ALICE").unwrap())
            .await
            .unwrap();
        assert_eq!(by_username.map(|u| u.id()), Some(user.id()));
    }

    #[tokio::test]
    async fn test_save_updates_in_place() {
        let store = InMemoryUserStore::new();
        let mut user = user("a@example.com", "alice");
        store.save(&user).await.unwrap();

        user.activate().unwrap();
        store.save(&user).await.unwrap();

        assert_eq!(store.len().await, 1);
        let loaded = store.find_by_id(user.id()).await.unwrap().unwrap();
        assert!(loaded.can_login());
    }

    #[tokio::test]
    async fn test_save_rejects_duplicates() {
        let store = InMemoryUserStore::new();
        store.save(&user("a@example.com", "alice")).await.unwrap();

        let err = store.save(&user("a@example.com", "bob")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref e) if e == "Email"));

        let err = store.save(&user("b@example.com", "Alice")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref e) if e == "Username"));
    }

    #[tokio::test]
    async fn test_outbox_keeps_events_until_marked() {
        let store = InMemoryUserStore::new();
        let mut user = user("a@example.com", "alice");
        store.save(&user).await.unwrap();
        user.clear_events();

        user.activate().unwrap();
        store.save(&user).await.unwrap();

        let pending = store.pending_events(user.id()).await.unwrap();
        let types: Vec<_> = pending.iter().map(UserEvent::event_type).collect();
        assert_eq!(types, ["user.created", "user.activated"]);

        store.mark_published(user.id(), 1).await.unwrap();
        let pending = store.pending_events(user.id()).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].event_type(), "user.activated");

        store.mark_published(user.id(), 5).await.unwrap();
        assert!(store.pending_events(user.id()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_save_leaves_outbox_untouched() {
        let store = InMemoryUserStore::new();
        let first = user("a@example.com", "alice");
        store.save(&first).await.unwrap();

        let duplicate = user("a@example.com", "bob");
        assert!(store.save(&duplicate).await.is_err());
        assert!(store.pending_events(duplicate.id()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryUserStore::new();
        let user = user("a@example.com", "alice");
        store.save(&user).await.unwrap();

        store.delete(user.id()).await.unwrap();
        assert!(store.is_empty().await);
        assert!(store.pending_events(user.id()).await.unwrap().is_empty());
        assert!(matches!(
            store.delete(user.id()).await,
            Err(AppError::NotFound)
        ));
    }
}
