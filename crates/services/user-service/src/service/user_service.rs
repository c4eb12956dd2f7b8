//! User service - Runs account use cases against the `User` aggregate.
//!
//! Every mutation follows the same unit of work: load, apply the aggregate
//! method, save (which stores the events in the user's outbox), publish the
//! outbox, then clear the aggregate's events. Argon2 work is moved off the
//! async runtime with `spawn_blocking`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use common::{AppError, AppResult, OptionExt};
use domain::{DomainError, DomainResult, Email, PasswordHash, Role, User, UserId, Username};

use crate::events::EventPublisher;
use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new pending account
    async fn register(&self, email: &str, username: &str, password: &str) -> AppResult<User>;

    /// Check credentials and return the user if it may log in
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<User>;

    /// Get user by ID (deleted users included)
    async fn get_user(&self, id: UserId) -> AppResult<User>;

    /// Replace display name and bio
    async fn update_profile(&self, id: UserId, display_name: String, bio: String)
        -> AppResult<User>;

    /// Change role from its textual form
    async fn change_role(&self, id: UserId, role: &str) -> AppResult<User>;

    /// Suspend an account
    async fn suspend(&self, id: UserId, reason: String) -> AppResult<User>;

    /// Activate a pending or suspended account
    async fn activate(&self, id: UserId) -> AppResult<User>;

    /// Replace the password after checking the current one
    async fn change_password(&self, id: UserId, current: &str, new: &str) -> AppResult<User>;

    /// Soft delete an account
    async fn delete_user(&self, id: UserId) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository and publisher.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(repo: Arc<dyn UserRepository>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self { repo, publisher }
    }

    async fn load(&self, id: UserId) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    /// Persist the aggregate, dispatch its outbox and clear its events.
    ///
    /// The save appends the recorded events to the user's outbox. Everything
    /// still pending there is published in order, so events left behind by an
    /// earlier failed publish go out ahead of the new ones.
    async fn commit(&self, user: &mut User) -> AppResult<()> {
        self.repo.save(user).await?;

        let pending = self.repo.pending_events(user.id()).await?;
        if !pending.is_empty() {
            self.publisher.publish(&pending).await?;
            self.repo.mark_published(user.id(), pending.len()).await?;
            debug!(user_id = %user.id(), count = pending.len(), "Events dispatched");
        }

        user.clear_events();
        Ok(())
    }

    /// Load, mutate and commit in one step.
    async fn mutate<F>(&self, id: UserId, change: F) -> AppResult<User>
    where
        F: FnOnce(&mut User) -> DomainResult<()> + Send,
    {
        let mut user = self.load(id).await?;
        change(&mut user)?;
        self.commit(&mut user).await?;
        Ok(user)
    }
}

/// Hash on the blocking pool; Argon2id is CPU and memory bound.
async fn hash_password(password: &str) -> AppResult<PasswordHash> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || PasswordHash::new(&password))
        .await
        .map_err(|e| AppError::internal(format!("Hashing task failed: {}", e)))?
        .map_err(AppError::from)
}

/// Verify on the blocking pool.
async fn verify_password(hash: PasswordHash, password: &str) -> AppResult<DomainResult<()>> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hash.verify(&password))
        .await
        .map_err(|e| AppError::internal(format!("Verification task failed: {}", e)))
}

/// Collapse credential failures into `InvalidCredentials`; keep everything else.
fn credential_result(user_id: UserId, result: DomainResult<()>) -> AppResult<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.is_credential_failure() => {
            warn!(user_id = %user_id, "Password verification failed");
            Err(AppError::InvalidCredentials)
        }
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn register(&self, email: &str, username: &str, password: &str) -> AppResult<User> {
        let email = Email::new(email)?;
        let username = Username::new(username)?;

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }
        if self.repo.find_by_username(&username).await?.is_some() {
            return Err(AppError::conflict("Username"));
        }

        let password_hash = hash_password(password).await?;
        let mut user = User::create(email, username, password_hash)?;
        self.commit(&mut user).await?;

        info!(user_id = %user.id(), "User registered");
        Ok(user)
    }

    async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        // An address that can't be valid can't belong to an account
        let email = Email::new(email).map_err(|_| AppError::InvalidCredentials)?;
        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let result = verify_password(user.password_hash().clone(), password).await?;
        credential_result(user.id(), result)?;

        if !user.can_login() {
            return Err(AppError::AccountInactive(user.status()));
        }
        if user.password_hash().needs_rehash() {
            info!(user_id = %user.id(), "Stored credential uses outdated hashing parameters");
        }

        debug!(user_id = %user.id(), "User authenticated");
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> AppResult<User> {
        self.load(id).await
    }

    async fn update_profile(
        &self,
        id: UserId,
        display_name: String,
        bio: String,
    ) -> AppResult<User> {
        self.mutate(id, move |user| user.update_profile(display_name, bio))
            .await
    }

    async fn change_role(&self, id: UserId, role: &str) -> AppResult<User> {
        let role: Role = role.parse()?;
        let user = self.mutate(id, |user| user.change_role(role)).await?;
        info!(user_id = %id, role = %role, "User role set");
        Ok(user)
    }

    async fn suspend(&self, id: UserId, reason: String) -> AppResult<User> {
        let user = self.mutate(id, move |user| user.suspend(reason)).await?;
        info!(user_id = %id, "User suspended");
        Ok(user)
    }

    async fn activate(&self, id: UserId) -> AppResult<User> {
        self.mutate(id, |user| user.activate()).await
    }

    async fn change_password(&self, id: UserId, current: &str, new: &str) -> AppResult<User> {
        let mut user = self.load(id).await?;
        if user.is_deleted() {
            return Err(DomainError::UserDeleted.into());
        }

        let result = verify_password(user.password_hash().clone(), current).await?;
        credential_result(id, result)?;

        let new_hash = hash_password(new).await?;
        user.change_password(new_hash)?;
        self.commit(&mut user).await?;

        info!(user_id = %id, "Password changed");
        Ok(user)
    }

    async fn delete_user(&self, id: UserId) -> AppResult<()> {
        self.mutate(id, |user| user.delete()).await?;
        info!(user_id = %id, "User deleted");
        Ok(())
    }
}
