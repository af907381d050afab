// identity.rs
//
// The service never handles credentials. An upstream identity provider
// authenticates each request and forwards the resolved identity as
// trusted headers; absent headers mean an anonymous caller.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

use crate::error::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_EMAIL_HEADER: &str = "x-user-email";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    /// Contact address, when the provider forwards one. Used only for
    /// the admin-capability check.
    pub email: Option<String>,
}

/// The caller of a single request, as resolved by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Anonymous,
    User(Identity),
}

impl Caller {
    pub fn user(&self) -> Option<&Identity> {
        match self {
            Caller::User(identity) => Some(identity),
            Caller::Anonymous => None,
        }
    }

    pub fn require_user(&self) -> Result<&Identity, AppError> {
        self.user().ok_or(AppError::Unauthenticated)
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Caller::Anonymous)
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Infallible> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Ok(match header(USER_ID_HEADER) {
            Some(id) => Caller::User(Identity {
                id,
                email: header(USER_EMAIL_HEADER),
            }),
            None => Caller::Anonymous,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_user_rejects_anonymous() {
        assert!(matches!(
            Caller::Anonymous.require_user(),
            Err(AppError::Unauthenticated)
        ));
    }

    #[test]
    fn require_user_passes_through_identity() {
        let caller = Caller::User(Identity {
            id: "u1".into(),
            email: None,
        });
        assert_eq!(caller.require_user().unwrap().id, "u1");
    }
}
