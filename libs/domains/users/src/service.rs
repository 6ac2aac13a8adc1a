use std::sync::Arc;
use tracing::instrument;
use validator::{Validate, ValidationErrors};

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};
use crate::repository::UserRepository;

/// Service layer for User business logic
///
/// The service enforces the rules the repository does not: input
/// validation, duplicate checks before create, and normalizing repository
/// misses and no-ops into the error taxonomy. It is the single place
/// errors are assigned a kind.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user; returns the repository-assigned id
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create(&self, input: CreateUser) -> UserResult<i32> {
        input
            .validate()
            .map_err(|e| UserError::InvalidInput(first_invalid_field(&e)))?;

        if self.repository.get_by_email(&input.email).await?.is_some() {
            return Err(UserError::AlreadyExists(input.email));
        }

        self.repository.add(input.into()).await
    }

    /// Get a user by email; a miss is an explicit `NotFound`
    pub async fn get_by_email(&self, email: &str) -> UserResult<User> {
        self.repository
            .get_by_email(email)
            .await?
            .ok_or(UserError::NotFound)
    }

    /// Get a user by id
    pub async fn get_by_id(&self, id: i32) -> UserResult<User> {
        if id < 1 {
            return Err(UserError::InvalidInput("id".to_string()));
        }

        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound)
    }

    /// All users; an empty store is not an error
    pub async fn get_all(&self) -> UserResult<Vec<User>> {
        self.repository.get_all().await
    }

    /// Update name/last_name of the record selected by the input's email.
    /// The stored id and email never change.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn update(&self, input: UpdateUser) -> UserResult<()> {
        input
            .validate()
            .map_err(|e| UserError::InvalidInput(first_invalid_field(&e)))?;

        let existing = self
            .repository
            .get_by_email(&input.email)
            .await?
            .ok_or(UserError::NotFound)?;

        let changed = User {
            id: existing.id,
            email: existing.email,
            name: input.name,
            last_name: input.last_name,
        };

        if !self.repository.update(changed).await? {
            // The record was there a moment ago; a concurrent delete or a
            // storage inconsistency ate the write.
            return Err(UserError::UpdateFailed);
        }

        Ok(())
    }

    /// Delete the user with the given id
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> UserResult<()> {
        if id < 1 {
            return Err(UserError::InvalidInput("id".to_string()));
        }

        if self.repository.get_by_id(id).await?.is_none() {
            return Err(UserError::NotFound);
        }

        if !self.repository.delete(id).await? {
            return Err(UserError::DeleteFailed);
        }

        Ok(())
    }
}

/// Name the first failing field in declaration order, so the message is
/// deterministic regardless of validator's internal map ordering.
fn first_invalid_field(errors: &ValidationErrors) -> String {
    for field in ["email", "name", "last_name"] {
        if errors.field_errors().keys().any(|k| *k == field) {
            return field.to_string();
        }
    }

    "input".to_string()
}
