//! Admin Console 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义与守卫规则（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `session` / `auth`: 会话状态与认证流程
//! - `api`: REST 后端客户端
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod chart;
    pub mod dashboard;
    pub mod home;
    pub mod login;
    pub mod navbar;
    pub mod profile;
    pub mod register;
    pub mod report;
}
mod config;
mod error;
mod fetch;
mod session;
#[cfg(test)]
mod test_support;

use crate::api::AdminApi;
use crate::auth::{AuthContext, init_auth};
use crate::components::dashboard::DashboardPage;
use crate::components::home::{HomePage, NotFoundPage};
use crate::components::login::LoginPage;
use crate::components::navbar::Navbar;
use crate::components::profile::ProfilePage;
use crate::components::register::RegisterPage;
use crate::components::report::ReportPage;

use leptos::prelude::*;

pub use crate::config::AppConfig;
pub use crate::web::ConsoleLogger;

// 浏览器 API 封装模块
// 所有 web_sys / gloo-net 调用集中在此，其余模块只依赖其中的 trait 与类型。
pub(crate) mod web {
    mod http;
    mod logger;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::{FetchHttpClient, HttpClient, HttpRequest, HttpResponse};
    pub use logger::ConsoleLogger;
    pub use storage::BrowserTokenStore;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::Report => view! { <ReportPage /> }.into_any(),
        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // 1. 共享配置与 API 客户端
    let api = AdminApi::from_config(&config);
    provide_context(config);
    provide_context(api.clone());

    // 2. 创建认证上下文并从存储的令牌恢复会话
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    init_auth(&auth_ctx, api);

    // 3. 会话信号注入路由服务，路由器只读不写
    let session = auth_ctx.session_signal();
    let ready = auth_ctx.ready_signal();

    view! {
        <Router session=session ready=ready>
            <Navbar />
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
