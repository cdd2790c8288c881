use crate::{
    AuthResponse, MockExternalUser, Profile, StatusToggleResult, User, UserListResponse,
    UserPatch,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// JSON body sent with the request. Use `()` for requests without one.
    type Body: Serialize;
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// The URL path relative to the API base.
    fn path(&self) -> String;

    /// Query string pairs, in order.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn body(&self) -> Option<&Self::Body> {
        None
    }
}

/// Serializes as `{}`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EmptyBody {}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl ApiRequest for RegisterRequest {
    type Body = Self;
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/auth/register".to_string()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Body = Self;
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/auth/login".to_string()
    }

    fn body(&self) -> Option<&Self> {
        Some(self)
    }
}

/// Toggle a user's active flag. The backend expects an empty object body.
#[derive(Debug, Clone)]
pub struct ToggleStatusRequest {
    pub user_id: String,
    body: EmptyBody,
}

impl ToggleStatusRequest {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            body: EmptyBody {},
        }
    }
}

impl ApiRequest for ToggleStatusRequest {
    type Body = EmptyBody;
    type Response = StatusToggleResult;
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        format!("/auth/users/{}/status", self.user_id)
    }

    fn body(&self) -> Option<&EmptyBody> {
        Some(&self.body)
    }
}

// =========================================================
// Users
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileRequest;

impl ApiRequest for ProfileRequest {
    type Body = ();
    type Response = Profile;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/users/profile".to_string()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListUsersRequest {
    pub page: u32,
    pub limit: u32,
}

impl ApiRequest for ListUsersRequest {
    type Body = ();
    type Response = UserListResponse;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/users".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("page", self.page.to_string()), ("limit", self.limit.to_string())]
    }
}

#[derive(Debug, Clone)]
pub struct UpdateUserRequest {
    pub user_id: String,
    pub patch: UserPatch,
}

impl ApiRequest for UpdateUserRequest {
    type Body = UserPatch;
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        format!("/users/users/{}", self.user_id)
    }

    fn body(&self) -> Option<&UserPatch> {
        Some(&self.patch)
    }
}

// =========================================================
// External mock source
// =========================================================

/// Page of the external mock user list. The path is empty because the
/// request goes to the mock source URL itself.
#[derive(Debug, Clone, Copy)]
pub struct MockUsersRequest {
    pub page: u32,
    pub limit: u32,
}

impl ApiRequest for MockUsersRequest {
    type Body = ();
    type Response = Vec<MockExternalUser>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        String::new()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("_page", self.page.to_string()), ("_limit", self.limit.to_string())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_embed_user_id() {
        assert_eq!(ToggleStatusRequest::new("42").path(), "/auth/users/42/status");
        let update = UpdateUserRequest {
            user_id: "7".into(),
            patch: UserPatch::default(),
        };
        assert_eq!(update.path(), "/users/users/7");
    }

    #[test]
    fn toggle_body_is_empty_object() {
        let req = ToggleStatusRequest::new("1");
        assert_eq!(serde_json::to_string(req.body().unwrap()).unwrap(), "{}");
    }

    #[test]
    fn list_query_keeps_order() {
        let req = ListUsersRequest { page: 2, limit: 5 };
        assert_eq!(
            req.query(),
            vec![("page", "2".to_string()), ("limit", "5".to_string())]
        );
        let mock = MockUsersRequest { page: 3, limit: 10 };
        assert_eq!(mock.query()[0], ("_page", "3".to_string()));
    }
}
