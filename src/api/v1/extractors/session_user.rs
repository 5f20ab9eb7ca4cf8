//! The authenticated principal as handlers see it.
//!
//! The session middleware validates the token and inserts this into the
//! request extensions; handlers receive it as an extractor argument. The
//! username is read-only, so nothing downstream can swap the principal.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct SessionUser {
    username: String,
}

impl SessionUser {
    pub fn new(username: String) -> Self {
        Self { username }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Absent means the session middleware never ran for this route
        // (a protected handler mounted outside the protected group).
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .ok_or(AppError::unauthorized("MISSING_SESSION"))
    }
}
