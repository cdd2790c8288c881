//! 表格状态模块
//!
//! 管理面板中与 DOM 无关的部分：分页、搜索过滤和列排序。

use admin_console_shared::{MockExternalUser, MockUserPage, PagedUserList, User};

use crate::error::ApiResult;
use crate::fetch::LoadState;

// =========================================================
// 分页
// =========================================================

/// `ceil(total / limit)`，总数为 0 或 `limit` 为 0 时为 0
pub fn total_pages(total: u64, limit: u32) -> u64 {
    if total == 0 || limit == 0 {
        return 0;
    }
    total.div_ceil(limit as u64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

impl Pagination {
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            total: 0,
        }
    }

    pub fn total_pages(&self) -> u64 {
        total_pages(self.total, self.limit)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        (self.page as u64) < self.total_pages()
    }
}

// =========================================================
// 搜索
// =========================================================

/// 按用户名或邮箱做大小写不敏感的子串匹配，保持原有顺序
pub fn filter_users(users: &[User], term: &str) -> Vec<User> {
    let needle = term.to_lowercase();
    users
        .iter()
        .filter(|u| {
            u.username.to_lowercase().contains(&needle) || u.email.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

// =========================================================
// 排序
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

/// 可排序的列
pub trait Column<Row>: Copy + PartialEq {
    fn value<'a>(&self, row: &'a Row) -> &'a str;
    fn label(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserColumn {
    Username,
    Email,
}

impl Column<User> for UserColumn {
    fn value<'a>(&self, row: &'a User) -> &'a str {
        match self {
            UserColumn::Username => &row.username,
            UserColumn::Email => &row.email,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            UserColumn::Username => "Username",
            UserColumn::Email => "Email",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockColumn {
    Name,
    Email,
}

impl Column<MockExternalUser> for MockColumn {
    fn value<'a>(&self, row: &'a MockExternalUser) -> &'a str {
        match self {
            MockColumn::Name => &row.name,
            MockColumn::Email => &row.email,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            MockColumn::Name => "Name",
            MockColumn::Email => "Email",
        }
    }
}

/// 当前排序列和方向
///
/// 每次点击都翻转上一次的方向（初始为升序，所以第一次点击是降序）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<C> {
    pub key: Option<C>,
    pub direction: SortDirection,
}

impl<C> Default for SortState<C> {
    fn default() -> Self {
        Self {
            key: None,
            direction: SortDirection::Asc,
        }
    }
}

impl<C: Copy + PartialEq> SortState<C> {
    pub fn toggle(&mut self, key: C) {
        self.direction = self.direction.flipped();
        self.key = Some(key);
    }

    /// 表头上显示的箭头，非当前列为空
    pub fn indicator(&self, key: C) -> &'static str {
        if self.key == Some(key) {
            self.direction.arrow()
        } else {
            ""
        }
    }

    /// 稳定排序，按字符串字典序比较
    pub fn apply<R>(&self, rows: &mut [R])
    where
        C: Column<R>,
    {
        let Some(key) = self.key else {
            return;
        };
        let direction = self.direction;
        rows.sort_by(|a, b| {
            let ord = key.value(a).cmp(key.value(b));
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }

    pub fn sorted<R: Clone>(&self, rows: &[R]) -> Vec<R>
    where
        C: Column<R>,
    {
        let mut rows = rows.to_vec();
        self.apply(&mut rows);
        rows
    }
}

/// 表格行的键：后端没有给出 id 时退回到邮箱
pub fn row_key(user: &User) -> String {
    if user.id.is_empty() {
        user.email.clone()
    } else {
        user.id.clone()
    }
}

/// 表格实际显示的注册用户：先过滤再排序，不会丢弃被过滤掉的原始数据
pub fn visible_users(users: &[User], term: &str, sort: &SortState<UserColumn>) -> Vec<User> {
    let mut rows = filter_users(users, term);
    sort.apply(&mut rows);
    rows
}

// =========================================================
// 合并并发获取的结果
// =========================================================

/// 一次获取完成后要写入视图的数据，`None` 表示保留原有内容
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardUpdate {
    pub users: Option<PagedUserList>,
    pub mock_users: Option<MockUserPage>,
    pub status: LoadState<()>,
}

/// 两个请求互不影响：任一成功就应用它的数据，只有都失败时才进入错误状态
pub fn merge_results(
    users: ApiResult<PagedUserList>,
    mock_users: ApiResult<MockUserPage>,
) -> DashboardUpdate {
    let users = users
        .inspect_err(|e| log::error!("[Dashboard] error fetching users: {}", e))
        .ok();
    let mock_users = mock_users
        .inspect_err(|e| log::error!("[Dashboard] error fetching mock users: {}", e))
        .ok();

    let status = if users.is_none() && mock_users.is_none() {
        LoadState::Errored("Failed to fetch dashboard data".to_string())
    } else {
        LoadState::Ready(())
    };

    DashboardUpdate {
        users,
        mock_users,
        status,
    }
}
