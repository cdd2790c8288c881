use admin_console_shared::protocol::{
    ApiRequest, ListUsersRequest, LoginRequest, MockUsersRequest, ProfileRequest,
    RegisterRequest, ToggleStatusRequest, UpdateUserRequest,
};
use admin_console_shared::{
    AuthResponse, HEADER_AUTHORIZATION, HEADER_TOTAL_COUNT, MOCK_USERS_TOTAL_FALLBACK,
    MockUserPage, PagedUserList, Profile, StatusToggleResult, User, UserPatch,
};
use serde::Deserialize;

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::web::{FetchHttpClient, HttpClient, HttpRequest, HttpResponse};

#[cfg(test)]
mod tests;

/// REST 后端与外部模拟数据源的客户端
///
/// 每次调用只尝试一次，没有重试和超时。
#[derive(Clone, Debug, PartialEq)]
pub struct AdminApi<C = FetchHttpClient> {
    base_url: String,
    mock_users_url: String,
    client: C,
}

impl AdminApi<FetchHttpClient> {
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.api_base_url.clone(),
            config.mock_users_url.clone(),
            FetchHttpClient,
        )
    }
}

impl<C: HttpClient> AdminApi<C> {
    pub fn new(base_url: String, mock_users_url: String, client: C) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            mock_users_url,
            client,
        }
    }

    pub async fn register(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> ApiResult<AuthResponse> {
        let req = RegisterRequest {
            username,
            email,
            password,
        };
        self.call(&self.base_url, &req, None).await
    }

    pub async fn login(&self, email: String, password: String) -> ApiResult<AuthResponse> {
        let req = LoginRequest { email, password };
        self.call(&self.base_url, &req, None).await
    }

    pub async fn fetch_profile(&self, token: &str) -> ApiResult<Profile> {
        self.call(&self.base_url, &ProfileRequest, Some(token)).await
    }

    /// 获取一页注册用户，`page`/`limit` 原样带回
    pub async fn fetch_registered_users(
        &self,
        token: &str,
        page: u32,
        limit: u32,
    ) -> ApiResult<PagedUserList> {
        let req = ListUsersRequest { page, limit };
        let res = self.call(&self.base_url, &req, Some(token)).await?;
        Ok(PagedUserList {
            users: res.users,
            page,
            limit,
            total: res.total,
        })
    }

    pub async fn update_user(
        &self,
        token: &str,
        user_id: &str,
        patch: &UserPatch,
    ) -> ApiResult<User> {
        let req = UpdateUserRequest {
            user_id: user_id.to_string(),
            patch: patch.clone(),
        };
        self.call(&self.base_url, &req, Some(token)).await
    }

    pub async fn toggle_user_status(
        &self,
        token: &str,
        user_id: &str,
    ) -> ApiResult<StatusToggleResult> {
        self.call(&self.base_url, &ToggleStatusRequest::new(user_id), Some(token))
            .await
    }

    /// 获取外部模拟用户
    ///
    /// 数据源提供 `X-Total-Count` 时使用它，否则总数固定为 100。
    pub async fn fetch_external_mock_users(
        &self,
        page: u32,
        limit: u32,
    ) -> ApiResult<MockUserPage> {
        let req = MockUsersRequest { page, limit };
        let res = self.execute(&self.mock_users_url, &req, None).await?;
        let total = res
            .header(HEADER_TOTAL_COUNT)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(MOCK_USERS_TOTAL_FALLBACK);
        let users = serde_json::from_str(&res.body)?;
        Ok(MockUserPage { users, total })
    }

    // =========================================================
    // 请求管线
    // =========================================================

    async fn call<R: ApiRequest>(
        &self,
        base: &str,
        req: &R,
        token: Option<&str>,
    ) -> ApiResult<R::Response> {
        let res = self.execute(base, req, token).await?;
        Ok(serde_json::from_str(&res.body)?)
    }

    /// 发送请求并把非 2xx 响应转换为 `ApiError::Backend`
    async fn execute<R: ApiRequest>(
        &self,
        base: &str,
        req: &R,
        token: Option<&str>,
    ) -> ApiResult<HttpResponse> {
        let http_req = build_request(base, req, token)?;
        log::debug!("[Api] {} {}", http_req.method.as_str(), http_req.url);

        let res = self.client.send(http_req).await?;
        if !res.ok() {
            let err = backend_error(&res);
            log::warn!("[Api] {} {} failed: {}", R::METHOD.as_str(), req.path(), err);
            return Err(err);
        }
        Ok(res)
    }
}

fn build_request<R: ApiRequest>(
    base: &str,
    req: &R,
    token: Option<&str>,
) -> ApiResult<HttpRequest> {
    let mut url = format!("{}{}", base, req.path());
    let query = req.query();
    if !query.is_empty() {
        let pairs: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        url.push('?');
        url.push_str(&pairs.join("&"));
    }

    let mut http_req = HttpRequest::new(url, R::METHOD);
    if let Some(token) = token {
        http_req = http_req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
    }
    if let Some(body) = req.body() {
        http_req = http_req
            .with_header("Content-Type", "application/json")
            .with_body(serde_json::to_string(body)?);
    }
    Ok(http_req)
}

#[derive(Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// 优先使用后端负载中的 `message`/`error`，其次是原始响应体
fn backend_error(res: &HttpResponse) -> ApiError {
    let from_payload = serde_json::from_str::<ErrorPayload>(&res.body)
        .ok()
        .and_then(|p| p.message.or(p.error))
        .filter(|m| !m.trim().is_empty());

    let message = from_payload.unwrap_or_else(|| {
        let raw = res.body.trim();
        if raw.is_empty() {
            format!("HTTP {}", res.status)
        } else {
            raw.to_string()
        }
    });

    ApiError::Backend {
        status: res.status,
        message,
    }
}
