//! newscase 共享领域层
//!
//! 前端与逻辑层共用的纯领域模型：
//! - `date`: 模拟日期（内容可用性与打卡判定的权威"今天"）
//! - `avatar`: 头像解锁表与激励文案
//! - `history`: 阅读历史的线格式归一化
//!
//! 本 crate 不做任何 I/O。

pub mod avatar;
pub mod date;
pub mod history;

pub use chrono;

use serde::{Deserialize, Serialize};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 持久化键：认证令牌
pub const KEY_TOKEN: &str = "userToken";
/// 持久化键：用户角色
pub const KEY_ROLE: &str = "userRole";
/// 持久化键：序列化的用户对象
pub const KEY_USER: &str = "user";
/// 持久化键：模拟日期
pub const KEY_SIM_DATE: &str = "simulatedDate";
/// 持久化键：后端地址（属于配置，不随会话清除）
pub const KEY_BACKEND_URL: &str = "backendUrl";

/// 默认后端地址
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001";

/// 进度轮询间隔（毫秒）
pub const PROGRESS_POLL_MILLIS: u32 = 5000;

/// 历史记录每页条数
pub const HISTORY_PAGE_SIZE: usize = 10;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 授权角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// 从持久化字符串解析，未知值一律按普通用户处理
    pub fn parse(s: &str) -> Self {
        match s {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }
}

/// 登录响应里由后端返回的用户对象
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// 已认证会话
///
/// 不变量：token 存在即 role 已设置，三者总是整体读写。
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub token: String,
    pub role: Role,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Newsletter 列表/详情条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Newsletter {
    pub id: i64,
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub motivational_text: String,
    /// 正文 HTML，由后端渲染
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: String,
}

/// 连续打卡状态（后端权威，客户端只读）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreakStatus {
    pub streak: u32,
    /// 历史最高连续天数，决定头像解锁
    pub highscore: u32,
}

/// 排行榜行
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LeaderboardRow {
    pub email: String,
    #[serde(default)]
    pub highscore: u32,
}

/// 指标：阅读量最高的 Newsletter
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MostViewedNewsletter {
    pub title: String,
    #[serde(default)]
    pub views: u32,
}

/// 指标：用户行（最高 streak / 最高 highscore 共用）
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetricUser {
    pub email: String,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub highscore: u32,
}

/// 统计：UTM 来源分布行
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceDistributionRow {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub user_count: u32,
}

/// 统计：活动效果行
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CampaignEffectivenessRow {
    #[serde(default)]
    pub campaign: Option<String>,
    #[serde(default)]
    pub average_highscore: f64,
}
