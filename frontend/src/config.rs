//! 运行时配置
//!
//! 前端没有进程环境变量，配置在构建时通过 `option_env!` 注入，
//! 未设置的项使用默认值。

use std::time::Duration;

use log::LevelFilter;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_MOCK_USERS_URL: &str = "https://jsonplaceholder.typicode.com/users";
const DEFAULT_PAGE_SIZE: u32 = 5;
const DEFAULT_REVEAL_DELAY_MS: u64 = 500;
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// 应用配置
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// REST 后端地址（不含结尾的 `/`）
    pub api_base_url: String,
    /// 外部模拟用户数据源地址
    pub mock_users_url: String,
    /// 管理面板每页条数
    pub page_size: u32,
    /// 个人资料页卡片显示动画的延迟
    pub reveal_delay: Duration,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}

impl AppConfig {
    /// 读取构建时注入的变量
    pub fn from_build_env() -> Self {
        Self::from_vars(|name| match name {
            "ADMIN_API_URL" => option_env!("ADMIN_API_URL"),
            "ADMIN_MOCK_USERS_URL" => option_env!("ADMIN_MOCK_USERS_URL"),
            "ADMIN_PAGE_SIZE" => option_env!("ADMIN_PAGE_SIZE"),
            "ADMIN_REVEAL_DELAY_MS" => option_env!("ADMIN_REVEAL_DELAY_MS"),
            "ADMIN_LOG_LEVEL" => option_env!("ADMIN_LOG_LEVEL"),
            _ => None,
        })
    }

    /// 通过查找函数构建配置，读不到或解析失败时使用默认值
    pub fn from_vars<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        let non_empty = |name: &str| lookup(name).map(str::trim).filter(|v| !v.is_empty());

        let api_base_url = non_empty("ADMIN_API_URL")
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        let mock_users_url = non_empty("ADMIN_MOCK_USERS_URL")
            .unwrap_or(DEFAULT_MOCK_USERS_URL)
            .to_string();
        let page_size = non_empty("ADMIN_PAGE_SIZE")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let reveal_delay = Duration::from_millis(
            non_empty("ADMIN_REVEAL_DELAY_MS")
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(DEFAULT_REVEAL_DELAY_MS),
        );
        let log_level = non_empty("ADMIN_LOG_LEVEL")
            .and_then(|v| v.parse::<LevelFilter>().ok())
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            api_base_url,
            mock_users_url,
            page_size,
            reveal_delay,
            log_level,
        }
    }
}
