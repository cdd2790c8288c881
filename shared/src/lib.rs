use serde::{Deserialize, Serialize};

pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 浏览器存储中保存 Bearer Token 的键
pub const TOKEN_STORAGE_KEY: &str = "token";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_TOTAL_COUNT: &str = "x-total-count";
/// 外部模拟数据源不返回总数时使用的近似值
pub const MOCK_USERS_TOTAL_FALLBACK: u64 = 100;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 用户角色
///
/// 线上格式为小写字符串，未知角色通过 `Other` 原样保留。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    #[default]
    User,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Other(name) => name,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "admin" => Role::Admin,
            "user" => Role::User,
            _ => Role::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 后端有时把 `active` 作为布尔值，有时作为计数返回
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ActiveField {
    Flag(bool),
    Count(u64),
    Other(serde::de::IgnoredAny),
}

impl ActiveField {
    fn as_flag(&self) -> bool {
        match self {
            ActiveField::Flag(flag) => *flag,
            ActiveField::Count(n) => *n > 0,
            ActiveField::Other(_) => true,
        }
    }

    fn as_count(&self) -> u64 {
        match self {
            ActiveField::Flag(flag) => *flag as u64,
            ActiveField::Count(n) => *n,
            ActiveField::Other(_) => 0,
        }
    }
}

/// 同时出现 `_id` 和 `id` 时以 `_id` 为准，都没有时为空
fn pick_id(mongo_id: Option<String>, id: Option<String>) -> String {
    mongo_id.or(id).unwrap_or_default()
}

#[derive(Deserialize)]
struct RawUser {
    #[serde(rename = "_id", default)]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    username: String,
    email: String,
    #[serde(default)]
    role: Option<Role>,
    #[serde(default)]
    active: Option<ActiveField>,
}

/// 注册用户（由后端持有，客户端只保存只读副本）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawUser")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
}

impl From<RawUser> for User {
    fn from(raw: RawUser) -> Self {
        User {
            id: pick_id(raw.mongo_id, raw.id),
            username: raw.username,
            email: raw.email,
            role: raw.role.unwrap_or_default(),
            active: raw.active.as_ref().map(ActiveField::as_flag).unwrap_or(true),
        }
    }
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// 登录 / 注册成功后的响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// 个人资料页使用的活跃统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivityStats {
    pub active: u64,
    pub inactive: u64,
}

#[derive(Deserialize)]
struct RawProfile {
    #[serde(rename = "_id", default)]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    username: String,
    email: String,
    #[serde(default)]
    role: Option<Role>,
    #[serde(default)]
    active: Option<ActiveField>,
    #[serde(default)]
    inactive: Option<ActiveField>,
}

/// `/users/profile` 的响应：用户字段加上统计数据
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawProfile")]
pub struct Profile {
    pub user: User,
    pub stats: ActivityStats,
}

impl From<RawProfile> for Profile {
    fn from(raw: RawProfile) -> Self {
        let user = User {
            id: pick_id(raw.mongo_id, raw.id),
            username: raw.username,
            email: raw.email,
            role: raw.role.unwrap_or_default(),
            active: raw.active.as_ref().map(ActiveField::as_flag).unwrap_or(true),
        };
        let stats = ActivityStats {
            active: raw.active.as_ref().map(ActiveField::as_count).unwrap_or(0),
            inactive: raw.inactive.as_ref().map(ActiveField::as_count).unwrap_or(0),
        };
        Profile { user, stats }
    }
}

impl Profile {
    /// 会话中保存的身份
    pub fn identity(&self) -> User {
        self.user.clone()
    }
}

/// `/users` 的线上响应
#[derive(Debug, Clone, Deserialize)]
pub struct UserListResponse {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub total: u64,
}

/// 一页注册用户
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PagedUserList {
    pub users: Vec<User>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub street: String,
}

/// 外部模拟数据源中的用户（只读）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockExternalUser {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MockUserPage {
    pub users: Vec<MockExternalUser>,
    pub total: u64,
}

/// 部分更新用户字段，未设置的字段不会被序列化
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.role.is_none()
    }
}

/// 切换用户状态的结果
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct StatusToggleResult {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_accepts_mongo_style_id() {
        let user: User = serde_json::from_str(
            r#"{"_id":"65a1","username":"alice","email":"a@x.com","role":"admin","active":false}"#,
        )
        .unwrap();
        assert_eq!(user.id, "65a1");
        assert!(user.is_admin());
        assert!(!user.active);
    }

    #[test]
    fn user_defaults_missing_role_and_active() {
        let user: User =
            serde_json::from_str(r#"{"id":"1","username":"bob","email":"b@x.com"}"#).unwrap();
        assert_eq!(user.role, Role::User);
        assert!(user.active);
    }

    #[test]
    fn user_with_both_ids_prefers_mongo_id() {
        let user: User = serde_json::from_str(
            r#"{"_id":"65a1","id":"virtual","username":"alice","email":"a@x.com","role":null}"#,
        )
        .unwrap();
        assert_eq!(user.id, "65a1");
        assert_eq!(user.role, Role::User);
        assert!(user.active);

        let list: UserListResponse = serde_json::from_str(
            r#"{"users":[{"_id":"1","id":"1","username":"a","email":"a@x.com"},
                         {"id":"2","username":"b","email":"b@x.com","active":null}],"total":2}"#,
        )
        .unwrap();
        assert_eq!(list.users.len(), 2);
        assert_eq!(list.users[1].id, "2");
        assert!(list.users[1].active);
    }

    #[test]
    fn user_serializes_plain_id() {
        let user: User =
            serde_json::from_str(r#"{"_id":"7","username":"d","email":"d@x.com"}"#).unwrap();
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], "7");
        assert!(json.get("_id").is_none());
    }

    #[test]
    fn unknown_role_round_trips() {
        let user: User = serde_json::from_str(
            r#"{"id":"1","username":"c","email":"c@x.com","role":"auditor"}"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::Other("auditor".to_string()));
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "auditor");
    }

    #[test]
    fn profile_reads_activity_counts() {
        let profile: Profile = serde_json::from_str(
            r#"{"_id":"9","username":"root","email":"r@x.com","role":"admin","active":12,"inactive":3}"#,
        )
        .unwrap();
        assert_eq!(profile.stats, ActivityStats { active: 12, inactive: 3 });
        assert!(profile.identity().active);
        assert_eq!(profile.identity().username, "root");
    }

    #[test]
    fn profile_accepts_both_ids_and_null_role() {
        let profile: Profile = serde_json::from_str(
            r#"{"_id":"9","id":"9","username":"u","email":"u@x.com","role":null,"active":2}"#,
        )
        .unwrap();
        assert_eq!(profile.user.id, "9");
        assert_eq!(profile.user.role, Role::User);
        assert_eq!(profile.stats.active, 2);
    }

    #[test]
    fn profile_falls_back_to_zero_counts() {
        let profile: Profile = serde_json::from_str(
            r#"{"id":"9","username":"u","email":"u@x.com","active":"n/a"}"#,
        )
        .unwrap();
        assert_eq!(profile.stats, ActivityStats::default());

        let profile: Profile =
            serde_json::from_str(r#"{"id":"9","username":"u","email":"u@x.com","active":true}"#)
                .unwrap();
        assert_eq!(profile.stats.active, 1);
        assert_eq!(profile.stats.inactive, 0);
    }

    #[test]
    fn patch_skips_unset_fields() {
        let patch = UserPatch {
            email: Some("new@x.com".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            r#"{"email":"new@x.com"}"#
        );
        assert!(UserPatch::default().is_empty());
    }

    #[test]
    fn mock_user_tolerates_extra_fields() {
        let user: MockExternalUser = serde_json::from_str(
            r#"{"id":1,"name":"Leanne","username":"Bret","email":"l@x.biz",
                "address":{"street":"Kulas Light","city":"Gwenborough","zipcode":"92998"},
                "phone":"1-770","website":"hildegard.org","company":{"name":"x"}}"#,
        )
        .unwrap();
        assert_eq!(user.address.city, "Gwenborough");
        assert_eq!(user.website, "hildegard.org");
    }
}
