use super::*;
use crate::test_support::mock_api;
use admin_console_shared::Role;
use admin_console_shared::protocol::HttpMethod;

const ALICE: &str = r#"{"_id":"u1","username":"Alice","email":"a@x.com","role":"admin","active":true}"#;

#[tokio::test]
async fn login_posts_credentials_without_auth_header() {
    let (api, client) = mock_api();
    client.respond_json(200, &format!(r#"{{"token":"t-1","user":{}}}"#, ALICE));

    let res = api
        .login("a@x.com".into(), "secret".into())
        .await
        .unwrap();

    assert_eq!(res.token, "t-1");
    assert_eq!(res.user.role, Role::Admin);

    let req = client.last_request();
    assert_eq!(req.method, HttpMethod::Post);
    assert_eq!(req.url, "http://backend.test/api/auth/login");
    assert_eq!(req.header("authorization"), None);
    assert_eq!(req.header("content-type"), Some("application/json"));
    let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, serde_json::json!({"email": "a@x.com", "password": "secret"}));
}

#[tokio::test]
async fn register_posts_all_fields() {
    let (api, client) = mock_api();
    client.respond_json(201, &format!(r#"{{"token":"t-2","user":{}}}"#, ALICE));

    api.register("Alice".into(), "a@x.com".into(), "pw".into())
        .await
        .unwrap();

    let req = client.last_request();
    assert_eq!(req.url, "http://backend.test/api/auth/register");
    let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["username"], "Alice");
    assert_eq!(body["password"], "pw");
}

#[tokio::test]
async fn profile_sends_bearer_token() {
    let (api, client) = mock_api();
    client.respond_json(200, r#"{"_id":"u1","username":"Alice","email":"a@x.com","role":"user","active":4,"inactive":1}"#);

    let profile = api.fetch_profile("tok").await.unwrap();

    assert_eq!(profile.stats.active, 4);
    let req = client.last_request();
    assert_eq!(req.method, HttpMethod::Get);
    assert_eq!(req.url, "http://backend.test/api/users/profile");
    assert_eq!(req.header("Authorization"), Some("Bearer tok"));
    assert!(req.body.is_none());
}

#[tokio::test]
async fn registered_users_carry_paging_and_total() {
    let (api, client) = mock_api();
    client.respond_json(200, &format!(r#"{{"users":[{}],"total":23}}"#, ALICE));

    let page = api.fetch_registered_users("tok", 2, 5).await.unwrap();

    assert_eq!(page.users.len(), 1);
    assert_eq!(page.page, 2);
    assert_eq!(page.limit, 5);
    assert_eq!(page.total, 23);
    assert_eq!(
        client.last_request().url,
        "http://backend.test/api/users?page=2&limit=5"
    );
}

#[tokio::test]
async fn update_user_sends_only_patched_fields() {
    let (api, client) = mock_api();
    client.respond_json(200, ALICE);

    let patch = UserPatch {
        role: Some(Role::Admin),
        ..Default::default()
    };
    let user = api.update_user("tok", "u1", &patch).await.unwrap();

    assert_eq!(user.id, "u1");
    let req = client.last_request();
    assert_eq!(req.method, HttpMethod::Patch);
    assert_eq!(req.url, "http://backend.test/api/users/users/u1");
    assert_eq!(req.body.as_deref(), Some(r#"{"role":"admin"}"#));
}

#[tokio::test]
async fn toggle_status_patches_with_empty_object() {
    let (api, client) = mock_api();
    client.respond_json(200, r#"{"message":"User status updated","active":false}"#);

    let res = api.toggle_user_status("tok", "u9").await.unwrap();

    assert_eq!(res.active, Some(false));
    let req = client.last_request();
    assert_eq!(req.url, "http://backend.test/api/auth/users/u9/status");
    assert_eq!(req.body.as_deref(), Some("{}"));
    assert_eq!(req.header("authorization"), Some("Bearer tok"));
}

#[tokio::test]
async fn mock_users_fall_back_to_fixed_total() {
    let (api, client) = mock_api();
    client.respond_json(
        200,
        r#"[{"id":1,"name":"Leanne","email":"l@x.biz","address":{"city":"G","street":"K"},"phone":"1","website":"h.org"}]"#,
    );

    let page = api.fetch_external_mock_users(1, 5).await.unwrap();

    assert_eq!(page.users.len(), 1);
    assert_eq!(page.total, 100);
    let req = client.last_request();
    assert_eq!(req.url, "http://mock.test/users?_page=1&_limit=5");
    assert_eq!(req.header("authorization"), None);
}

#[tokio::test]
async fn mock_users_prefer_total_count_header() {
    let (api, client) = mock_api();
    client.respond(HttpResponse::new(200, "[]").with_header("X-Total-Count", "10"));

    let page = api.fetch_external_mock_users(3, 5).await.unwrap();

    assert!(page.users.is_empty());
    assert_eq!(page.total, 10);
}

#[tokio::test]
async fn backend_payload_message_is_surfaced() {
    let (api, client) = mock_api();
    client.respond_json(400, r#"{"message":"Invalid credentials"}"#);

    let err = api.login("a@x.com".into(), "bad".into()).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Backend {
            status: 400,
            message: "Invalid credentials".into()
        }
    );
    assert_eq!(err.to_string(), "Invalid credentials");
}

#[tokio::test]
async fn backend_error_field_and_raw_body_are_used() {
    let (api, client) = mock_api();
    client
        .respond_json(401, r#"{"error":"jwt expired"}"#)
        .respond_json(502, "Bad Gateway")
        .respond_json(500, "");

    let first = api.fetch_profile("old").await.unwrap_err();
    assert!(first.is_unauthorized());
    assert_eq!(first.to_string(), "jwt expired");

    let second = api.fetch_profile("tok").await.unwrap_err();
    assert_eq!(second.to_string(), "Bad Gateway");

    let third = api.fetch_profile("tok").await.unwrap_err();
    assert_eq!(third.to_string(), "HTTP 500");
}

#[tokio::test]
async fn transport_failure_is_network_error() {
    let (api, client) = mock_api();
    client.fail("connection refused");

    let err = api.fetch_registered_users("tok", 1, 5).await.unwrap_err();

    assert_eq!(err, ApiError::Network("connection refused".into()));
}

#[tokio::test]
async fn malformed_success_body_is_decode_error() {
    let (api, client) = mock_api();
    client.respond_json(200, "<html>oops</html>");

    let err = api.fetch_profile("tok").await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let api = AdminApi::new(
        "http://backend.test/api/".into(),
        "http://mock.test/users".into(),
        crate::test_support::MockHttpClient::default(),
    );
    let req = build_request(&api.base_url, &ProfileRequest, None).unwrap();
    assert_eq!(req.url, "http://backend.test/api/users/profile");
}
