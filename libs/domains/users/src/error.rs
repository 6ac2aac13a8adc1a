use thiserror::Error;

/// Error taxonomy for user operations.
///
/// The service layer is the single place these are assigned; repositories
/// only ever produce `AlreadyExists` (duplicate key on `add`) and `Unknown`
/// (backend I/O failure).
#[derive(Debug, Error)]
pub enum UserError {
    #[error("{0} is not valid")]
    InvalidInput(String),

    #[error("user with email '{0}' already exists")]
    AlreadyExists(String),

    #[error("user not found")]
    NotFound,

    #[error("cannot update the user")]
    UpdateFailed,

    #[error("user was not removed")]
    DeleteFailed,

    #[error("storage error: {0}")]
    Unknown(String),
}

pub type UserResult<T> = Result<T, UserError>;
