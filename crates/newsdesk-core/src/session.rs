//! # Session
//!
//! The authenticated context of the running client.

use std::fmt;

use crate::api::{LoginResponse, Role};

/// Identity of the logged-in operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    /// Username as returned by the backend.
    pub username: String,
    /// Role of the operator.
    pub role: Role,
    /// Numeric user id.
    pub id: u64,
}

/// Bearer credential plus operator identity.
///
/// Exactly one session exists while logged in; it lives only in memory and
/// is dropped on logout.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    operator: Operator,
}

impl Session {
    /// Creates a session.
    #[must_use]
    pub fn new(token: impl Into<String>, operator: Operator) -> Self {
        Self {
            token: token.into(),
            operator,
        }
    }

    /// The bearer credential.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The logged-in operator.
    #[must_use]
    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    /// Whether the operator may use the administration client.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.operator.role == Role::Admin
    }
}

impl From<LoginResponse> for Session {
    fn from(login: LoginResponse) -> Self {
        Self::new(
            login.token,
            Operator {
                username: login.username,
                role: login.role,
                id: login.user_id,
            },
        )
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("operator", &self.operator)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_login() {
        let session = Session::from(LoginResponse {
            token: "jwt".to_string(),
            username: "admin".to_string(),
            role: Role::Admin,
            user_id: 1,
        });

        assert_eq!(session.token(), "jwt");
        assert_eq!(session.operator().id, 1);
        assert!(session.is_admin());
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::new(
            "secret-jwt",
            Operator {
                username: "ed".to_string(),
                role: Role::Editor,
                id: 2,
            },
        );

        let printed = format!("{session:?}");
        assert!(!printed.contains("secret-jwt"));
        assert!(!session.is_admin());
    }
}
