//! Identity DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{Role, UserId};
use infra_db::repositories::users::UserRow;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "full name is required"))]
    pub full_name: String,
    #[validate(email(message = "a valid email address is required"))]
    pub email: String,
    // bcrypt truncates input beyond 72 bytes
    #[validate(length(min = 8, max = 72, message = "password must be 8 to 72 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "a valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserPayload {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

impl From<UserRow> for UserPayload {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            role: row.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: UserPayload,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_validation() {
        let valid = RegisterRequest {
            full_name: "Jordan Lee".to_string(),
            email: "jordan@campus.edu".to_string(),
            password: "hunter2222".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..valid_request()
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            password: "short".to_string(),
            ..valid_request()
        };
        assert!(short_password.validate().is_err());
    }

    fn valid_request() -> RegisterRequest {
        RegisterRequest {
            full_name: "Jordan Lee".to_string(),
            email: "jordan@campus.edu".to_string(),
            password: "hunter2222".to_string(),
        }
    }
}
