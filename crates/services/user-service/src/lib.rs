//! User Service Library
//!
//! Application layer around the identity domain: the repository and event
//! publisher contracts, in-memory implementations of both, the service that
//! runs each use case as load, mutate, save, publish and clear, plus the
//! operator CLI.

pub mod cli;
pub mod commands;
pub mod config;
pub mod events;
pub mod repository;
pub mod service;

pub use config::UserServiceConfig;
pub use events::{EventPublisher, InMemoryEventPublisher, TracingEventPublisher};
pub use repository::{InMemoryUserStore, UserRepository};
pub use service::{UserManager, UserService};
