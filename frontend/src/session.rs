//! 会话模块
//!
//! `Session` 是客户端对"谁已登录、凭据是什么"的判断。
//! 所有修改都同时作用于内存和持久化存储，持久化只经过 `TokenStore`。

use admin_console_shared::User;

use crate::api::AdminApi;
use crate::web::HttpClient;

/// 令牌的持久化存储
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn remove(&self);
}

/// 当前会话
///
/// 不变量：`identity` 存在时 `token` 一定存在；没有身份的令牌不会保存在内存中。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    identity: Option<User>,
    token: Option<String>,
}

impl Session {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn identity(&self) -> Option<&User> {
        self.identity.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// 会话已建立（身份存在）
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.identity.as_ref().is_some_and(User::is_admin)
    }

    /// 登录或注册成功后调用：先持久化令牌，再更新内存状态
    pub fn establish<S: TokenStore + ?Sized>(&mut self, store: &S, identity: User, token: String) {
        store.save(&token);
        log::info!("[Session] established for {}", identity.username);
        self.identity = Some(identity);
        self.token = Some(token);
    }

    /// 注销：清除存储中的令牌和内存中的身份，总是成功
    pub fn clear<S: TokenStore + ?Sized>(&mut self, store: &S) {
        store.remove();
        self.identity = None;
        self.token = None;
    }

    /// 启动时从存储恢复会话
    ///
    /// 没有令牌时不发起请求。获取资料失败时返回空会话；
    /// 只有后端明确拒绝令牌（401/403）时才删除存储中的令牌，
    /// 网络失败等其他情况保留它。
    pub async fn hydrate<S, C>(store: &S, api: &AdminApi<C>) -> Session
    where
        S: TokenStore + ?Sized,
        C: HttpClient,
    {
        let Some(token) = store.load() else {
            log::debug!("[Session] no stored token");
            return Session::empty();
        };

        match api.fetch_profile(&token).await {
            Ok(profile) => {
                log::info!("[Session] restored for {}", profile.user.username);
                Session {
                    identity: Some(profile.identity()),
                    token: Some(token),
                }
            }
            Err(e) => {
                log::warn!("[Session] error fetching profile: {}", e);
                if e.is_unauthorized() {
                    store.remove();
                }
                Session::empty()
            }
        }
    }
}
