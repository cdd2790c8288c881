//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 守卫 -> 处理 -> 加载"的导航流程，守卫规则见 `route::guard`。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, history_path, resolve};
use crate::session::Session;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 通过注入的会话信号实现与认证系统的解耦：
/// 路由器只读取会话，从不修改它。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    session: Signal<Session>,
    /// 会话恢复完成前不执行守卫
    ready: Signal<bool>,
}

impl RouterService {
    fn new(session: Signal<Session>, ready: Signal<bool>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            session,
            ready,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    pub fn is_ready(&self) -> Signal<bool> {
        self.ready
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(path, true);
    }

    /// 导航到指定路由
    ///
    /// `use_push` 为 true 时使用 pushState，否则使用 replaceState。
    fn navigate_to_route(&self, path: &str, use_push: bool) {
        let target = AppRoute::from_path(path);
        let resolution = self.session.with_untracked(|session| resolve(target, session));
        if resolution.redirected {
            log::info!("[Router] {} redirected to {}", target, resolution.route);
        }

        let url = history_path(&resolution, path);
        if use_push {
            push_history_state(url);
        } else {
            replace_history_state(url);
        }
        self.set_route.set(resolution.route);
    }

    /// 浏览器后退/前进时同样执行守卫
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            router.navigate_to_route(&current_path(), false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话变化（或恢复完成）时重新检查当前路由
    fn setup_session_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            let ready = router.ready.get();
            let session = router.session.get();
            if !ready {
                return;
            }

            let route = router.current_route.get_untracked();
            let resolution = resolve(route, &session);
            if resolution.redirected {
                log::info!(
                    "[Router] session changed, redirecting {} to {}",
                    route,
                    resolution.route
                );
                replace_history_state(resolution.route.to_path());
                router.set_route.set(resolution.route);
            }
        });
    }
}

fn provide_router(session: Signal<Session>, ready: Signal<bool>) -> RouterService {
    let router = RouterService::new(session, ready);

    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件，应在 App 根部使用
#[component]
pub fn Router(
    /// 当前会话
    session: Signal<Session>,
    /// 会话是否已完成恢复
    ready: Signal<bool>,
    children: Children,
) -> impl IntoView {
    provide_router(session, ready);

    children()
}

/// 路由出口组件
///
/// 会话恢复期间显示加载状态，之后根据当前路由渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        if !router.is_ready().get() {
            return view! {
                <div class="flex items-center justify-center min-h-screen">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
            .into_any();
        }
        matcher(router.current_route().get())
    }
}

/// 站内链接，点击时通过路由服务导航
#[component]
pub fn Link(
    /// 目标路由
    to: AppRoute,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(to.to_path());
    };

    view! {
        <a href=to.to_path() class=class on:click=on_click>
            {children()}
        </a>
    }
}
