use serde::{Deserialize, Serialize};
use validator::Validate;

/// User entity
///
/// `id` is assigned by the repository when the record is first stored and
/// never changes afterwards. `email` is the unique key within a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Repository-assigned identifier (positive once persisted)
    pub id: i32,
    /// User email (unique)
    pub email: String,
    /// First name
    pub name: String,
    /// Last name
    pub last_name: String,
}

impl User {
    /// Build an unpersisted user. The repository assigns the id on `add`.
    pub fn new(email: String, name: String, last_name: String) -> Self {
        Self {
            id: 0,
            email,
            name,
            last_name,
        }
    }
}

/// DTO for creating a new user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
}

/// DTO for updating an existing user
///
/// The email selects the record; only `name` and `last_name` are written.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
}

impl From<CreateUser> for User {
    fn from(input: CreateUser) -> Self {
        User::new(input.email, input.name, input.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_validates_email_format() {
        let input = CreateUser {
            email: "not-an-email".to_string(),
            name: "John".to_string(),
            last_name: "Connor".to_string(),
        };

        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_user_rejects_empty_name() {
        let input = CreateUser {
            email: "john@example.com".to_string(),
            name: "".to_string(),
            last_name: "Connor".to_string(),
        };

        assert!(input.validate().is_err());
    }

    #[test]
    fn test_valid_input_passes() {
        let input = CreateUser {
            email: "john@example.com".to_string(),
            name: "John".to_string(),
            last_name: "Connor".to_string(),
        };

        assert!(input.validate().is_ok());
    }
}
