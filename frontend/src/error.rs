use thiserror::Error;

/// 调用后端或外部数据源时的统一错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 请求没有得到响应
    #[error("网络错误: {0}")]
    Network(String),
    /// 后端返回了非 2xx 状态，`message` 来自错误负载或原始响应体
    #[error("{message}")]
    Backend { status: u16, message: String },
    /// 需要令牌的操作没有可用的会话
    #[error("No token found. Please log in.")]
    AuthMissing,
    /// 响应体无法解析
    #[error("响应解析失败: {0}")]
    Decode(String),
}

impl ApiError {
    /// 后端明确拒绝了令牌
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Backend { status: 401 | 403, .. })
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
