//! 视图的数据获取生命周期
//!
//! `idle -> loading -> {ready, errored}`，翻页或依赖变化时重新进入 loading。
//! `FetchGate` 用代数计数丢弃过期的请求结果。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Errored(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Errored(msg) => Some(msg),
            _ => None,
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for LoadState<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => LoadState::Ready(value),
            Err(e) => LoadState::Errored(e.to_string()),
        }
    }
}

/// 某一次请求的代数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// 每个视图一个，只有最新一次请求的结果会被应用
#[derive(Debug, Clone, Default)]
pub struct FetchGate {
    generation: Arc<AtomicU64>,
}

impl FetchGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始新的请求，之前发出的票据全部过期
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// 视图卸载时调用，使所有未完成的请求过期
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
