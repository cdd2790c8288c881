//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由，以及由会话决定的守卫规则。

use std::fmt::Display;

use crate::session::Session;

/// 重定向最多跟随的次数
const MAX_REDIRECT_HOPS: usize = 4;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 欢迎页
    #[default]
    Home,
    Login,
    Register,
    /// 管理面板（仅管理员）
    Dashboard,
    Profile,
    Report,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Home,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/dashboard" => Self::Dashboard,
            "/profile" => Self::Profile,
            "/report" => Self::Report,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::Profile => "/profile",
            Self::Report => "/report",
            Self::NotFound => "/404",
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 守卫的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow(AppRoute),
    Redirect(AppRoute),
}

/// **核心守卫逻辑**
///
/// 纯函数：相同的路由和会话总是得到相同的结果。
/// 非管理员访问面板时重定向到个人资料页，未登录时重定向到登录页。
pub fn guard(route: AppRoute, session: &Session) -> RouteDecision {
    use AppRoute::*;
    use RouteDecision::*;

    let signed_in = session.is_authenticated();
    match route {
        Home | NotFound => Allow(route),
        Login | Register if signed_in => Redirect(Profile),
        Login | Register => Allow(route),
        Dashboard if session.is_admin() => Allow(Dashboard),
        Dashboard if signed_in => Redirect(Profile),
        Profile | Report if signed_in => Allow(route),
        Dashboard | Profile | Report => Redirect(Login),
    }
}

/// 跟随重定向后的最终路由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub route: AppRoute,
    pub redirected: bool,
}

/// 反复应用守卫直到允许访问
///
/// 超过跳数上限时停在登录页（未登录）或个人资料页（已登录）。
pub fn resolve(route: AppRoute, session: &Session) -> Resolution {
    let mut current = route;
    for _ in 0..MAX_REDIRECT_HOPS {
        match guard(current, session) {
            RouteDecision::Allow(target) => {
                return Resolution {
                    route: target,
                    redirected: target != route,
                };
            }
            RouteDecision::Redirect(target) => current = target,
        }
    }

    let fallback = if session.is_authenticated() {
        AppRoute::Profile
    } else {
        AppRoute::Login
    };
    log::error!("[Router] redirect limit reached from {}, falling back to {}", route, fallback);
    Resolution {
        route: fallback,
        redirected: true,
    }
}

/// 写入地址栏的路径：未知路径保留用户输入的原样，其余使用规范路径
pub fn history_path<'a>(resolution: &Resolution, requested: &'a str) -> &'a str {
    match resolution.route {
        AppRoute::NotFound => requested,
        route => route.to_path(),
    }
}

#[cfg(test)]
mod tests {
    use super::AppRoute::*;
    use super::RouteDecision::*;
    use super::*;
    use crate::test_support::MemoryTokenStore;
    use admin_console_shared::{Role, User};

    fn session_with(role: Role) -> Session {
        let mut session = Session::empty();
        let user = User {
            id: "1".into(),
            username: "u".into(),
            email: "u@x.com".into(),
            role,
            active: true,
        };
        session.establish(&MemoryTokenStore::default(), user, "t".into());
        session
    }

    #[test]
    fn paths_round_trip() {
        for route in [Home, Login, Register, Dashboard, Profile, Report] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
        assert_eq!(AppRoute::from_path("/profile/"), Profile);
        assert_eq!(AppRoute::from_path("/nope"), NotFound);
    }

    #[test]
    fn anonymous_guard_table() {
        let anon = Session::empty();
        assert_eq!(guard(Home, &anon), Allow(Home));
        assert_eq!(guard(Login, &anon), Allow(Login));
        assert_eq!(guard(Register, &anon), Allow(Register));
        assert_eq!(guard(Dashboard, &anon), Redirect(Login));
        assert_eq!(guard(Profile, &anon), Redirect(Login));
        assert_eq!(guard(Report, &anon), Redirect(Login));
        assert_eq!(guard(NotFound, &anon), Allow(NotFound));
    }

    #[test]
    fn user_guard_table() {
        let user = session_with(Role::User);
        assert_eq!(guard(Login, &user), Redirect(Profile));
        assert_eq!(guard(Register, &user), Redirect(Profile));
        assert_eq!(guard(Dashboard, &user), Redirect(Profile));
        assert_eq!(guard(Profile, &user), Allow(Profile));
        assert_eq!(guard(Report, &user), Allow(Report));
    }

    #[test]
    fn admin_reaches_dashboard() {
        let admin = session_with(Role::Admin);
        assert_eq!(guard(Dashboard, &admin), Allow(Dashboard));
        assert_eq!(guard(Login, &admin), Redirect(Profile));
    }

    #[test]
    fn unknown_roles_are_not_admins() {
        let other = session_with(Role::Other("auditor".into()));
        assert_eq!(guard(Dashboard, &other), Redirect(Profile));
    }

    #[test]
    fn resolve_follows_redirects_without_looping() {
        let user = session_with(Role::User);
        assert_eq!(
            resolve(Dashboard, &user),
            Resolution {
                route: Profile,
                redirected: true
            }
        );
        assert_eq!(
            resolve(Dashboard, &Session::empty()),
            Resolution {
                route: Login,
                redirected: true
            }
        );
        assert_eq!(
            resolve(Report, &user),
            Resolution {
                route: Report,
                redirected: false
            }
        );
    }

    #[test]
    fn guard_is_deterministic() {
        let user = session_with(Role::User);
        for route in [Home, Login, Register, Dashboard, Profile, Report, NotFound] {
            assert_eq!(guard(route, &user), guard(route, &user));
        }
    }

    #[test]
    fn unknown_paths_keep_requested_url() {
        let anon = Session::empty();
        let requested = "/users/42/settings";
        let resolution = resolve(AppRoute::from_path(requested), &anon);
        assert_eq!(resolution.route, NotFound);
        assert_eq!(history_path(&resolution, requested), requested);

        let resolution = resolve(AppRoute::from_path("/profile/"), &anon);
        assert_eq!(history_path(&resolution, "/profile/"), "/login");
    }
}
