// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::AuthError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub full_name: String,
    pub role: String,
}

/// Presence check followed by a plain comparison against the configured pair.
pub fn authenticate(
    input: &Credentials,
    expected: &Credentials,
    user: &UserInfo,
) -> Result<UserInfo, AuthError> {
    if input.username.trim().is_empty() {
        return Err(AuthError::MissingUsername);
    }
    if input.password.trim().is_empty() {
        return Err(AuthError::MissingPassword);
    }
    if input != expected {
        tracing::warn!(username = %input.username, "login rejected");
        return Err(AuthError::Rejected);
    }

    tracing::info!(username = %input.username, role = %user.role, "login accepted");
    Ok(user.clone())
}
