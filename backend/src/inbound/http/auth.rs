//! Identity context supplied by the upstream authenticator.
//!
//! The router collaborator authenticates every request and annotates it with
//! the requester's identity and role. This adapter trusts those annotations
//! (`x-user-id`, `x-user-role` headers) and only enforces the capability
//! policy itself.

use std::future::{ready, Ready};
use std::str::FromStr;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use serde_json::json;

use crate::domain::{Capability, Error, Role, UserId};

use super::error::ApiError;

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the authenticated role annotation.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Authenticated requester identity extracted from the trusted headers.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    user_id: UserId,
    role: Role,
}

impl AuthContext {
    /// The authenticated requester.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// The annotated role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Check the capability policy, returning the requester id on success.
    pub fn authorize(&self, capability: Capability) -> Result<UserId, ApiError> {
        if self.role.grants(capability) {
            return Ok(self.user_id);
        }
        Err(Error::forbidden(format!(
            "role {} does not grant {capability}",
            self.role
        ))
        .with_details(json!({
            "role": self.role,
            "capability": capability.as_str(),
            "code": "capability_denied",
        }))
        .into())
    }

    fn from_headers(req: &HttpRequest) -> Result<Self, Error> {
        let user_id = header_value(req, USER_ID_HEADER)?;
        let role = header_value(req, USER_ROLE_HEADER)?;
        let user_id = UserId::parse(user_id)?;
        let role = Role::from_str(role).map_err(|err| {
            Error::unauthorized(err.to_string())
                .with_details(json!({ "header": USER_ROLE_HEADER, "code": "unknown_role" }))
        })?;
        Ok(Self { user_id, role })
    }
}

fn header_value<'r>(req: &'r HttpRequest, name: &'static str) -> Result<&'r str, Error> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            Error::unauthorized("authentication required")
                .with_details(json!({ "header": name, "code": "missing_identity" }))
        })
}

impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, ApiError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_headers(req).map_err(ApiError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::test::TestRequest;

    #[test]
    fn missing_headers_are_unauthorised() {
        let req = TestRequest::default().to_http_request();
        let error = AuthContext::from_headers(&req).expect_err("missing identity");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[test]
    fn unknown_role_is_unauthorised() {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, UserId::random().to_string()))
            .insert_header((USER_ROLE_HEADER, "superuser"))
            .to_http_request();
        let error = AuthContext::from_headers(&req).expect_err("unknown role");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[test]
    fn valid_headers_yield_a_context() {
        let id = UserId::random();
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, id.to_string()))
            .insert_header((USER_ROLE_HEADER, "moderator"))
            .to_http_request();
        let ctx = AuthContext::from_headers(&req).expect("valid identity");
        assert_eq!(ctx.user_id(), id);
        assert_eq!(ctx.role(), Role::Moderator);
    }

    #[test]
    fn authorize_enforces_the_capability_policy() {
        let ctx = AuthContext {
            user_id: UserId::random(),
            role: Role::Creator,
        };
        assert!(ctx.authorize(Capability::SubmitProject).is_ok());
        let error = ctx
            .authorize(Capability::ModerateProjects)
            .expect_err("creator may not moderate");
        assert_eq!(error.code(), ErrorCode::Forbidden);
    }
}
