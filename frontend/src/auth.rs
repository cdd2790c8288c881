//! 认证模块
//!
//! 管理会话状态，与路由系统解耦。
//! 路由服务通过注入的会话信号来执行守卫；会话只在这里被修改。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::AdminApi;
use crate::config::AppConfig;
use crate::error::ApiResult;
use crate::session::Session;
use crate::web::BrowserTokenStore;

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 当前会话（只读）
    pub session: ReadSignal<Session>,
    set_session: WriteSignal<Session>,
    /// 是否正在从存储恢复会话
    pub is_loading: ReadSignal<bool>,
    set_loading: WriteSignal<bool>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (session, set_session) = signal(Session::empty());
        let (is_loading, set_loading) = signal(true);
        Self {
            session,
            set_session,
            is_loading,
            set_loading,
        }
    }

    /// 会话信号（用于路由服务注入）
    pub fn session_signal(&self) -> Signal<Session> {
        self.session.into()
    }

    /// 恢复完成信号（用于路由服务注入）
    pub fn ready_signal(&self) -> Signal<bool> {
        let is_loading = self.is_loading;
        Signal::derive(move || !is_loading.get())
    }

    /// 当前令牌（响应式读取）
    pub fn token(&self) -> Option<String> {
        self.session.with(|s| s.token().map(str::to_owned))
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> AdminApi {
    use_context::<AdminApi>().expect("AdminApi should be provided")
}

pub fn use_config() -> AppConfig {
    use_context::<AppConfig>().expect("AppConfig should be provided")
}

/// 初始化认证状态
///
/// 异步地从 localStorage 中的令牌恢复会话，完成后放开路由守卫。
pub fn init_auth(ctx: &AuthContext, api: AdminApi) {
    let ctx = *ctx;
    spawn_local(async move {
        let session = Session::hydrate(&BrowserTokenStore, &api).await;
        ctx.set_session.set(session);
        ctx.set_loading.set(false);
    });
}

/// 登录并建立会话
///
/// 导航由路由服务监听会话变化自动处理。
pub async fn login(
    ctx: &AuthContext,
    api: &AdminApi,
    email: String,
    password: String,
) -> ApiResult<()> {
    let res = api.login(email, password).await?;
    ctx.set_session
        .update(|session| session.establish(&BrowserTokenStore, res.user, res.token));
    Ok(())
}

/// 注册并建立会话
pub async fn register(
    ctx: &AuthContext,
    api: &AdminApi,
    username: String,
    email: String,
    password: String,
) -> ApiResult<()> {
    let res = api.register(username, email, password).await?;
    ctx.set_session
        .update(|session| session.establish(&BrowserTokenStore, res.user, res.token));
    Ok(())
}

/// 注销并清除状态，不发起请求
pub fn logout(ctx: &AuthContext) {
    ctx.set_session
        .update(|session| session.clear(&BrowserTokenStore));
    log::info!("[Auth] logged out");
}
