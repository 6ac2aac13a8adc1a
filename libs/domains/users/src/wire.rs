//! Wire response codes and reply envelopes.
//!
//! The closed four-value code set is the only error shape that crosses the
//! network boundary; transport adapters encode these replies directly and
//! never see a raw `UserError`. The mapping matches on `(Operation,
//! &UserError)` with no wildcard over the error, so adding a taxonomy
//! variant will not compile until every operation's mapping is decided.

use serde::{Deserialize, Serialize};

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Response code transmitted over the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireCode {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "INVALIDINPUT")]
    InvalidInput,
    #[serde(rename = "NOTFOUND")]
    NotFound,
    #[serde(rename = "FAILED")]
    Failed,
}

/// The operation whose outcome is being mapped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Get,
    GetAll,
    Update,
    Delete,
}

/// Map a domain error to its wire code for the given operation.
pub fn code_for(op: Operation, err: &UserError) -> WireCode {
    use Operation::*;

    match (op, err) {
        (Create, UserError::AlreadyExists(_)) => WireCode::Failed,
        (
            Create,
            UserError::InvalidInput(_)
            | UserError::NotFound
            | UserError::UpdateFailed
            | UserError::DeleteFailed
            | UserError::Unknown(_),
        ) => WireCode::InvalidInput,

        (Update, UserError::NotFound) => WireCode::NotFound,
        (Update, UserError::UpdateFailed) => WireCode::Failed,
        (
            Update,
            UserError::InvalidInput(_)
            | UserError::AlreadyExists(_)
            | UserError::DeleteFailed
            | UserError::Unknown(_),
        ) => WireCode::InvalidInput,

        (Delete, UserError::NotFound) => WireCode::NotFound,
        (Delete, UserError::InvalidInput(_)) => WireCode::InvalidInput,
        (
            Delete,
            UserError::AlreadyExists(_)
            | UserError::UpdateFailed
            | UserError::DeleteFailed
            | UserError::Unknown(_),
        ) => WireCode::Failed,

        (Get | GetAll, UserError::NotFound) => WireCode::NotFound,
        (Get | GetAll, UserError::InvalidInput(_)) => WireCode::InvalidInput,
        (
            Get | GetAll,
            UserError::AlreadyExists(_)
            | UserError::UpdateFailed
            | UserError::DeleteFailed
            | UserError::Unknown(_),
        ) => WireCode::Failed,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserReply {
    pub code: WireCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CreateUserReply {
    pub fn from_result(result: UserResult<i32>) -> Self {
        match result {
            Ok(id) => Self {
                code: WireCode::Ok,
                user_id: Some(id),
                message: None,
            },
            Err(err) => Self {
                code: code_for(Operation::Create, &err),
                user_id: None,
                message: Some(err.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserReply {
    pub code: WireCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GetUserReply {
    pub fn from_result(result: UserResult<User>) -> Self {
        match result {
            Ok(user) => Self {
                code: WireCode::Ok,
                user: Some(user),
                message: None,
            },
            Err(err) => Self {
                code: code_for(Operation::Get, &err),
                user: None,
                message: Some(err.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersReply {
    pub code: WireCode,
    pub users: Vec<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ListUsersReply {
    pub fn from_result(result: UserResult<Vec<User>>) -> Self {
        match result {
            Ok(users) => Self {
                code: WireCode::Ok,
                users,
                message: None,
            },
            Err(err) => Self {
                code: code_for(Operation::GetAll, &err),
                users: Vec::new(),
                message: Some(err.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserReply {
    pub code: WireCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl UpdateUserReply {
    pub fn from_result(result: UserResult<()>) -> Self {
        match result {
            Ok(()) => Self {
                code: WireCode::Ok,
                message: None,
            },
            Err(err) => Self {
                code: code_for(Operation::Update, &err),
                message: Some(err.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUserReply {
    pub code: WireCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DeleteUserReply {
    pub fn from_result(result: UserResult<()>) -> Self {
        match result {
            Ok(()) => Self {
                code: WireCode::Ok,
                message: None,
            },
            Err(err) => Self {
                code: code_for(Operation::Delete, &err),
                message: Some(err.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_mapping() {
        let cases = [
            (UserError::AlreadyExists("a@x.com".into()), WireCode::Failed),
            (UserError::InvalidInput("email".into()), WireCode::InvalidInput),
            (UserError::NotFound, WireCode::InvalidInput),
            (UserError::Unknown("io".into()), WireCode::InvalidInput),
        ];

        for (err, expected) in cases {
            assert_eq!(code_for(Operation::Create, &err), expected, "{err}");
        }
    }

    #[test]
    fn test_update_mapping() {
        let cases = [
            (UserError::NotFound, WireCode::NotFound),
            (UserError::UpdateFailed, WireCode::Failed),
            (UserError::InvalidInput("name".into()), WireCode::InvalidInput),
            (UserError::Unknown("io".into()), WireCode::InvalidInput),
        ];

        for (err, expected) in cases {
            assert_eq!(code_for(Operation::Update, &err), expected, "{err}");
        }
    }

    #[test]
    fn test_delete_mapping() {
        let cases = [
            (UserError::NotFound, WireCode::NotFound),
            (UserError::InvalidInput("id".into()), WireCode::InvalidInput),
            (UserError::DeleteFailed, WireCode::Failed),
            (UserError::Unknown("io".into()), WireCode::Failed),
        ];

        for (err, expected) in cases {
            assert_eq!(code_for(Operation::Delete, &err), expected, "{err}");
        }
    }

    #[test]
    fn test_get_mapping() {
        assert_eq!(code_for(Operation::Get, &UserError::NotFound), WireCode::NotFound);
        assert_eq!(
            code_for(Operation::GetAll, &UserError::Unknown("io".into())),
            WireCode::Failed
        );
    }

    #[test]
    fn test_update_success_is_ok() {
        let reply = UpdateUserReply::from_result(Ok(()));
        assert_eq!(reply.code, WireCode::Ok);
        assert!(reply.message.is_none());
    }

    #[test]
    fn test_create_reply_carries_the_id() {
        let reply = CreateUserReply::from_result(Ok(42));
        assert_eq!(reply.code, WireCode::Ok);
        assert_eq!(reply.user_id, Some(42));
    }

    #[test]
    fn test_wire_code_serialization() {
        assert_eq!(serde_json::to_string(&WireCode::Ok).unwrap(), "\"OK\"");
        assert_eq!(
            serde_json::to_string(&WireCode::InvalidInput).unwrap(),
            "\"INVALIDINPUT\""
        );
        assert_eq!(
            serde_json::to_string(&WireCode::NotFound).unwrap(),
            "\"NOTFOUND\""
        );
        assert_eq!(serde_json::to_string(&WireCode::Failed).unwrap(), "\"FAILED\"");
    }

    #[test]
    fn test_error_reply_serializes_without_payload_fields() {
        let reply = CreateUserReply::from_result(Err(UserError::AlreadyExists(
            "a@x.com".to_string(),
        )));
        let json = serde_json::to_value(&reply).unwrap();

        assert_eq!(json["code"], "FAILED");
        assert!(json.get("user_id").is_none());
        assert_eq!(
            json["message"],
            "user with email 'a@x.com' already exists"
        );
    }
}
