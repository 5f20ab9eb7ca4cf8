/*
 * Responsibility
 * - Account / auth request & response DTOs with format validation
 */
use serde::{Deserialize, Serialize};

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 20;
const PASSWORD_MIN: usize = 8;
const BIO_MAX: usize = 1000;

fn validate_username(username: &str) -> Result<(), &'static str> {
    let len = username.chars().count();
    if len < USERNAME_MIN || len > USERNAME_MAX {
        return Err("username must be 3-20 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err("username must be alphanumeric or underscore");
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_username(&self.username)?;
        if self.password.chars().count() < PASSWORD_MIN {
            return Err("password must be at least 8 characters");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err("username and password are required");
        }
        Ok(())
    }
}

/// Issued on successful login or registration.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub username: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub bio: String,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBioRequest {
    pub bio: String,
}

impl UpdateBioRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.bio.chars().count() > BIO_MAX {
            return Err("bio must be <= 1000 characters");
        }
        Ok(())
    }
}

/// Membership / saved flags for the `/me/...` state endpoints.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub state: bool,
}
