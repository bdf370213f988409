//! 客户端错误类型
//!
//! 按后端调用在视图层的消化方式分类：所有错误最终都落为
//! 视图内联消息或日志，不会作为未处理故障向上传播。

use std::fmt;

// =========================================================
// 错误状态枚举
// =========================================================

/// 错误语义分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStatus {
    /// 凭据无效（内联展示，非致命）
    Auth,
    /// 网络失败或非 2xx 响应（可关闭的内联消息）
    Network,
    /// 响应解析失败（降级为空数据并记日志）
    Parse,
    /// 本地策略拒绝（不发网络请求）
    Policy,
    /// 持久化存储不可用
    Storage,
}

impl ErrorStatus {
    pub fn error_code(&self) -> &'static str {
        match self {
            ErrorStatus::Auth => "AUTH_FAILED",
            ErrorStatus::Network => "NETWORK_ERROR",
            ErrorStatus::Parse => "PARSE_ERROR",
            ErrorStatus::Policy => "POLICY_VIOLATION",
            ErrorStatus::Storage => "STORAGE_ERROR",
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 客户端统一错误
///
/// - status: 错误语义
/// - message: 面向用户/日志的消息
/// - operation: 出错的操作名，如 "clock.advance", "api.streak"
#[derive(Debug)]
pub struct ClientError {
    pub status: ErrorStatus,
    pub message: String,
    operation: Option<String>,
}

impl ClientError {
    pub fn new(status: ErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            operation: None,
        }
    }

    // --- Convenience constructors ---

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(ErrorStatus::Auth, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorStatus::Network, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorStatus::Parse, message)
    }

    pub fn policy(message: impl Into<String>) -> Self {
        Self::new(ErrorStatus::Policy, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorStatus::Storage, message)
    }

    /// 附加操作上下文
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    pub fn is_policy(&self) -> bool {
        self.status == ErrorStatus::Policy
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operation {
            Some(op) => write!(f, "[{}] {}: {}", self.status.error_code(), op, self.message),
            None => write!(f, "[{}] {}", self.status.error_code(), self.message),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::parse(e.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
