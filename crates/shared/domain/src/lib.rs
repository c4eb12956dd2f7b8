//! Domain layer - User identity entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! validated value objects, Argon2id credentials, the `User` aggregate with
//! its lifecycle state machine, and the domain events it records.
//!
//! Nothing here performs I/O or holds locks. Hashing and verifying a
//! [`PasswordHash`] are deliberately slow, blocking calls.

pub mod constants;
pub mod denylist;
pub mod email;
pub mod error;
pub mod events;
pub mod password;
pub mod role;
pub mod user;
pub mod user_id;
pub mod username;

pub use constants::*;
pub use denylist::{Denylist, Denylists, StaticDenylist};
pub use email::Email;
pub use error::{DomainError, DomainResult};
pub use events::UserEvent;
pub use password::PasswordHash;
pub use role::{Role, UserStatus};
pub use user::{User, UserRecord};
pub use user_id::UserId;
pub use username::Username;
