//! User aggregate root.
//!
//! All changes to an account go through the methods here. Each mutator checks
//! its preconditions, applies the change, stamps `updated_at` and records at
//! most one [`UserEvent`]. Transitions:
//!
//! ```text
//! pending -> active <-> suspended
//!    any non-deleted -> deleted (terminal)
//! ```

use chrono::{DateTime, Utc};

use crate::constants::{MAX_BIO_LENGTH, MAX_DISPLAY_NAME_LENGTH};
use crate::email::Email;
use crate::error::{DomainError, DomainResult};
use crate::events::UserEvent;
use crate::password::PasswordHash;
use crate::role::{Role, UserStatus};
use crate::user_id::UserId;
use crate::username::Username;

/// Persisted shape of a user, as handed to and returned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub email: Email,
    pub username: Username,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub status: UserStatus,
    pub display_name: String,
    pub bio: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User aggregate root
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    email: Email,
    username: Username,
    password_hash: PasswordHash,
    role: Role,
    status: UserStatus,
    display_name: String,
    bio: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    events: Vec<UserEvent>,
}

impl User {
    /// Register a new account.
    ///
    /// The user starts as `pending` with the `user` role and the username as
    /// display name. Records `UserEvent::Created`.
    pub fn create(email: Email, username: Username, password_hash: PasswordHash) -> DomainResult<Self> {
        if email.as_str().is_empty() {
            return Err(DomainError::EmailEmpty);
        }
        if username.as_str().is_empty() {
            return Err(DomainError::UsernameEmpty);
        }
        if password_hash.is_empty() {
            return Err(DomainError::PasswordHashEmpty);
        }

        let now = Utc::now();
        let mut user = Self {
            id: UserId::new(),
            display_name: username.as_str().to_string(),
            email,
            username,
            password_hash,
            role: Role::User,
            status: UserStatus::Pending,
            bio: String::new(),
            created_at: now,
            updated_at: now,
            events: Vec::new(),
        };

        user.record(UserEvent::Created {
            user_id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            occurred_at: now,
        });

        Ok(user)
    }

    /// Rebuild a user loaded from storage.
    ///
    /// Fields are trusted as-is and no event is recorded.
    pub fn reconstruct(record: UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            username: record.username,
            password_hash: record.password_hash,
            role: record.role,
            status: record.status,
            display_name: record.display_name,
            bio: record.bio,
            created_at: record.created_at,
            updated_at: record.updated_at,
            events: Vec::new(),
        }
    }

    /// Snapshot for storage; pending events are not part of it.
    pub fn to_record(&self) -> UserRecord {
        UserRecord {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
            password_hash: self.password_hash.clone(),
            role: self.role,
            status: self.status,
            display_name: self.display_name.clone(),
            bio: self.bio.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn bio(&self) -> &str {
        &self.bio
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check if user is soft deleted
    pub fn is_deleted(&self) -> bool {
        self.status.is_deleted()
    }

    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Only active accounts may log in
    pub fn can_login(&self) -> bool {
        self.status.can_login()
    }

    // -------------------------------------------------------------------------
    // Mutators
    // -------------------------------------------------------------------------

    /// Replace display name and bio.
    pub fn update_profile(
        &mut self,
        display_name: impl Into<String>,
        bio: impl Into<String>,
    ) -> DomainResult<()> {
        self.ensure_not_deleted()?;

        let display_name = display_name.into();
        let bio = bio.into();
        if display_name.chars().count() > MAX_DISPLAY_NAME_LENGTH {
            return Err(DomainError::DisplayNameTooLong);
        }
        if bio.chars().count() > MAX_BIO_LENGTH {
            return Err(DomainError::BioTooLong);
        }

        self.display_name = display_name;
        self.bio = bio;
        let now = self.touch();
        self.record(UserEvent::ProfileUpdated {
            user_id: self.id,
            display_name: self.display_name.clone(),
            bio: self.bio.clone(),
            occurred_at: now,
        });

        Ok(())
    }

    /// Change the role. Setting the current role again is a no-op.
    pub fn change_role(&mut self, new_role: Role) -> DomainResult<()> {
        self.ensure_not_deleted()?;

        if self.role == new_role {
            return Ok(());
        }

        let old_role = self.role;
        self.role = new_role;
        let now = self.touch();
        self.record(UserEvent::RoleChanged {
            user_id: self.id,
            old_role,
            new_role,
            occurred_at: now,
        });

        Ok(())
    }

    /// Suspend the account. Already suspended accounts are left untouched.
    pub fn suspend(&mut self, reason: impl Into<String>) -> DomainResult<()> {
        self.ensure_not_deleted()?;

        if self.status == UserStatus::Suspended {
            return Ok(());
        }

        self.status = UserStatus::Suspended;
        let now = self.touch();
        self.record(UserEvent::Suspended {
            user_id: self.id,
            reason: reason.into(),
            occurred_at: now,
        });

        Ok(())
    }

    /// Activate the account. Already active accounts are left untouched.
    pub fn activate(&mut self) -> DomainResult<()> {
        self.ensure_not_deleted()?;

        if self.status == UserStatus::Active {
            return Ok(());
        }

        self.status = UserStatus::Active;
        let now = self.touch();
        self.record(UserEvent::Activated {
            user_id: self.id,
            occurred_at: now,
        });

        Ok(())
    }

    /// Replace the stored credential.
    pub fn change_password(&mut self, new_hash: PasswordHash) -> DomainResult<()> {
        self.ensure_not_deleted()?;

        if new_hash.is_empty() {
            return Err(DomainError::PasswordHashEmpty);
        }

        self.password_hash = new_hash;
        let now = self.touch();
        self.record(UserEvent::PasswordChanged {
            user_id: self.id,
            occurred_at: now,
        });

        Ok(())
    }

    /// Soft delete. After this only the accessors remain usable.
    pub fn delete(&mut self) -> DomainResult<()> {
        self.ensure_not_deleted()?;

        self.status = UserStatus::Deleted;
        let now = self.touch();
        self.record(UserEvent::Deleted {
            user_id: self.id,
            occurred_at: now,
        });

        Ok(())
    }

    /// Check a plaintext against the stored credential. Never mutates.
    pub fn verify_password(&self, plain_text: &str) -> DomainResult<()> {
        self.password_hash.verify(plain_text)
    }

    // -------------------------------------------------------------------------
    // Event buffer
    // -------------------------------------------------------------------------

    /// Events recorded since the last [`User::clear_events`].
    pub fn events(&self) -> &[UserEvent] {
        &self.events
    }

    /// Drop recorded events. Call only after they have been dispatched.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    fn ensure_not_deleted(&self) -> DomainResult<()> {
        if self.is_deleted() {
            return Err(DomainError::UserDeleted);
        }
        Ok(())
    }

    fn touch(&mut self) -> DateTime<Utc> {
        self.updated_at = Utc::now();
        self.updated_at
    }

    fn record(&mut self, event: UserEvent) {
        self.events.push(event);
    }
}
