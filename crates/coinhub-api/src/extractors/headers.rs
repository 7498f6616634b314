//! Identity headers carried by every client request.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use uuid::Uuid;

use coinhub_core::error::AppError;

use crate::error::ApiError;

/// Header carrying the username.
pub const USERNAME: &str = "Username";
/// Header carrying the plaintext password on register and login.
pub const PASSWORD: &str = "Password";
/// Header carrying the session token.
pub const TOKEN: &str = "Token";
/// Header carrying the target group ID.
pub const GROUP_ID: &str = "ID";

/// Read a header that must be present and non-empty.
pub fn required_header(headers: &HeaderMap, name: &str) -> Result<String, AppError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::validation(format!("Missing {name} header")))
}

/// The group named by the `ID` header.
///
/// Extracted ahead of [`AuthUser`](super::AuthUser) on group routes, so a
/// request without the header is rejected with 400 before its session is
/// looked at.
#[derive(Debug, Clone)]
pub struct GroupRef(String);

impl GroupRef {
    /// Read the `ID` header. Missing or empty is a validation error.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, AppError> {
        required_header(headers, GROUP_ID).map(Self)
    }

    /// The header value as a group ID.
    ///
    /// A value that is not a UUID cannot name any group and is reported as
    /// not found.
    pub fn id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(self.0.trim()).map_err(|_| AppError::not_found("Group not found"))
    }
}

impl<S> FromRequestParts<S> for GroupRef
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers)?)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use coinhub_core::error::ErrorKind;

    use super::*;

    #[test]
    fn test_required_header() {
        let mut headers = HeaderMap::new();
        headers.insert("username", HeaderValue::from_static("alice"));
        headers.insert("token", HeaderValue::from_static(""));

        assert_eq!(required_header(&headers, USERNAME).unwrap(), "alice");
        assert_eq!(
            required_header(&headers, TOKEN).unwrap_err().kind,
            ErrorKind::Validation
        );
        assert_eq!(
            required_header(&headers, PASSWORD).unwrap_err().kind,
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_group_ref() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        assert_eq!(
            GroupRef::from_headers(&headers).unwrap_err().kind,
            ErrorKind::Validation
        );

        headers.insert("id", HeaderValue::from_static("not-a-uuid"));
        let group = GroupRef::from_headers(&headers).unwrap();
        assert_eq!(group.id().unwrap_err().kind, ErrorKind::NotFound);

        headers.insert("id", HeaderValue::from_str(&id.to_string()).unwrap());
        assert_eq!(GroupRef::from_headers(&headers).unwrap().id().unwrap(), id);
    }
}
