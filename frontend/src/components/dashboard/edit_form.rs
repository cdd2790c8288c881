//! 编辑用户表单状态
//!
//! 将零散的 signal 整合为 `EditUserForm` 结构体，负责：
//! - 从表格行载入数据
//! - 数据的重置
//! - 生成只包含改动字段的 `UserPatch`

use admin_console_shared::{Role, User, UserPatch};
use leptos::prelude::*;

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，适合在闭包和组件间传递。
#[derive(Clone, Copy)]
pub struct EditUserForm {
    /// 正在编辑的原始记录，`None` 表示表单关闭
    pub original: RwSignal<Option<User>>,
    pub username: RwSignal<String>,
    pub email: RwSignal<String>,
    pub role: RwSignal<String>,
}

impl EditUserForm {
    pub fn new() -> Self {
        Self {
            original: RwSignal::new(None),
            username: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            role: RwSignal::new(String::new()),
        }
    }

    /// 打开表单并载入一行数据
    pub fn load(&self, user: &User) {
        self.username.set(user.username.clone());
        self.email.set(user.email.clone());
        self.role.set(user.role.to_string());
        self.original.set(Some(user.clone()));
    }

    pub fn is_open(&self) -> bool {
        self.original.with(Option::is_some)
    }

    /// 关闭并清空表单
    pub fn reset(&self) {
        self.original.set(None);
        self.username.set(String::new());
        self.email.set(String::new());
        self.role.set(String::new());
    }

    /// 当前编辑的用户 ID 和对应的补丁
    pub fn to_patch(&self) -> Option<(String, UserPatch)> {
        let original = self.original.get_untracked()?;
        let patch = build_patch(
            &original,
            &self.username.get_untracked(),
            &self.email.get_untracked(),
            &self.role.get_untracked(),
        );
        Some((original.id, patch))
    }
}

impl Default for EditUserForm {
    fn default() -> Self {
        Self::new()
    }
}

/// 比较编辑后的值与原始记录，只保留改动过且非空的字段
pub fn build_patch(original: &User, username: &str, email: &str, role: &str) -> UserPatch {
    let changed = |value: &str, current: &str| {
        let value = value.trim();
        (!value.is_empty() && value != current).then(|| value.to_string())
    };

    UserPatch {
        username: changed(username, &original.username),
        email: changed(email, &original.email),
        role: changed(role, original.role.as_str()).map(Role::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bob() -> User {
        User {
            id: "u2".into(),
            username: "bob".into(),
            email: "b@x.com".into(),
            role: Role::User,
            active: true,
        }
    }

    #[test]
    fn unchanged_form_gives_empty_patch() {
        assert!(build_patch(&bob(), "bob", "b@x.com", "user").is_empty());
    }

    #[test]
    fn only_changed_fields_are_patched() {
        let patch = build_patch(&bob(), " bobby ", "b@x.com", "admin");
        assert_eq!(patch.username.as_deref(), Some("bobby"));
        assert_eq!(patch.email, None);
        assert_eq!(patch.role, Some(Role::Admin));
    }

    #[test]
    fn blank_fields_are_ignored() {
        let patch = build_patch(&bob(), "", "  ", "");
        assert!(patch.is_empty());
    }
}
