//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 访问浏览器本地存储。

use admin_console_shared::TOKEN_STORAGE_KEY;

use crate::session::TokenStore;

/// 本地存储操作封装
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 获取存储的字符串值，键不存在或发生错误时返回 `None`
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 设置存储值，返回操作是否成功
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// 删除存储的键值对，返回操作是否成功
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

/// 把令牌保存在 localStorage 的 `token` 键下
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTokenStore;

impl TokenStore for BrowserTokenStore {
    fn load(&self) -> Option<String> {
        LocalStorage::get(TOKEN_STORAGE_KEY).filter(|t| !t.is_empty())
    }

    fn save(&self, token: &str) {
        if !LocalStorage::set(TOKEN_STORAGE_KEY, token) {
            log::warn!("[Storage] failed to persist token");
        }
    }

    fn remove(&self) {
        if !LocalStorage::delete(TOKEN_STORAGE_KEY) {
            log::warn!("[Storage] failed to remove token");
        }
    }
}
