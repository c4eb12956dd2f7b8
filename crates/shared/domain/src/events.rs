//! Domain events emitted by the `User` aggregate.
//!
//! Events are immutable records appended by the aggregate's mutators. They are
//! drained by the caller after the aggregate has been persisted.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::email::Email;
use crate::role::Role;
use crate::user_id::UserId;
use crate::username::Username;

/// Every mutation the aggregate can record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserEvent {
    Created {
        user_id: UserId,
        email: Email,
        username: Username,
        occurred_at: DateTime<Utc>,
    },
    ProfileUpdated {
        user_id: UserId,
        display_name: String,
        bio: String,
        occurred_at: DateTime<Utc>,
    },
    RoleChanged {
        user_id: UserId,
        old_role: Role,
        new_role: Role,
        occurred_at: DateTime<Utc>,
    },
    Suspended {
        user_id: UserId,
        reason: String,
        occurred_at: DateTime<Utc>,
    },
    Activated {
        user_id: UserId,
        occurred_at: DateTime<Utc>,
    },
    /// Carries no credential material
    PasswordChanged {
        user_id: UserId,
        occurred_at: DateTime<Utc>,
    },
    Deleted {
        user_id: UserId,
        occurred_at: DateTime<Utc>,
    },
}

impl UserEvent {
    /// Stable name used for routing by the event dispatcher
    pub fn event_type(&self) -> &'static str {
        match self {
            UserEvent::Created { .. } => "user.created",
            UserEvent::ProfileUpdated { .. } => "user.profile_updated",
            UserEvent::RoleChanged { .. } => "user.role_changed",
            UserEvent::Suspended { .. } => "user.suspended",
            UserEvent::Activated { .. } => "user.activated",
            UserEvent::PasswordChanged { .. } => "user.password_changed",
            UserEvent::Deleted { .. } => "user.deleted",
        }
    }

    pub fn user_id(&self) -> UserId {
        match self {
            UserEvent::Created { user_id, .. }
            | UserEvent::ProfileUpdated { user_id, .. }
            | UserEvent::RoleChanged { user_id, .. }
            | UserEvent::Suspended { user_id, .. }
            | UserEvent::Activated { user_id, .. }
            | UserEvent::PasswordChanged { user_id, .. }
            | UserEvent::Deleted { user_id, .. } => *user_id,
        }
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            UserEvent::Created { occurred_at, .. }
            | UserEvent::ProfileUpdated { occurred_at, .. }
            | UserEvent::RoleChanged { occurred_at, .. }
            | UserEvent::Suspended { occurred_at, .. }
            | UserEvent::Activated { occurred_at, .. }
            | UserEvent::PasswordChanged { occurred_at, .. }
            | UserEvent::Deleted { occurred_at, .. } => *occurred_at,
        }
    }
}
