//! Users Domain
//!
//! This crate provides the domain implementation for user management:
//! CRUD operations over a pluggable persistence capability, with a stable
//! error taxonomy and the wire-code mapping consumed by transport
//! adapters.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │    Wire     │  ← response codes + reply envelopes for transports
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← business logic, validation, error taxonomy
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← data access (trait + in-memory implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← entities, DTOs
//! └─────────────┘
//! ```
//!
//! Transport adapters decode a request into a [`CreateUser`]/[`UpdateUser`]
//! value, call the [`UserService`], and encode the [`wire`] reply; they
//! never see a raw [`UserError`].
//!
//! # Usage
//!
//! ```rust
//! use domain_users::{
//!     repository::InMemoryUserRepository,
//!     service::UserService,
//!     wire::CreateUserReply,
//!     CreateUser,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let repository = InMemoryUserRepository::new();
//! let service = UserService::new(repository);
//!
//! let reply = CreateUserReply::from_result(
//!     service
//!         .create(CreateUser {
//!             email: "john@example.com".to_string(),
//!             name: "John".to_string(),
//!             last_name: "Connor".to_string(),
//!         })
//!         .await,
//! );
//! assert_eq!(reply.user_id, Some(1));
//! # }
//! ```

pub mod error;
pub mod models;
pub mod repository;
pub mod service;
pub mod sharded;
pub mod wire;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use models::{CreateUser, UpdateUser, User};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
pub use sharded::ShardedInMemoryRepository;
pub use wire::{Operation, WireCode};
