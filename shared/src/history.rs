//! 阅读历史的线格式归一化
//!
//! 后端历史接口的返回形态不稳定：`history` 字段可能是
//! `"id|timestamp"` 字符串数组，也可能是 JSON 编码后的字符串。
//! 归一化逐条解析，坏条目跳过，整体读取永不失败。

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// 一条已归一化的历史记录
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub newsletter_id: String,
    pub viewed_at: DateTime<FixedOffset>,
}

/// `GET /users/:id/history` 的原始响应
#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: HistoryPayload,
}

/// history 字段的两种观测形态
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum HistoryPayload {
    Entries(Vec<String>),
    Encoded(String),
}

impl Default for HistoryPayload {
    fn default() -> Self {
        HistoryPayload::Entries(Vec::new())
    }
}

impl HistoryPayload {
    /// 归一化为类型化列表
    ///
    /// 字符串形态先按 JSON 数组解码，解码失败视为空；
    /// 单条解析失败只丢弃该条。
    pub fn normalize(&self) -> Vec<HistoryEntry> {
        let raw: Vec<String> = match self {
            HistoryPayload::Entries(v) => v.clone(),
            HistoryPayload::Encoded(s) => serde_json::from_str(s).unwrap_or_default(),
        };
        raw.iter().filter_map(|e| parse_entry(e)).collect()
    }
}

/// 解析 "newsletterId|timestamp" 条目
fn parse_entry(raw: &str) -> Option<HistoryEntry> {
    let (id, ts) = raw.split_once('|')?;
    if id.is_empty() {
        return None;
    }
    let viewed_at = DateTime::parse_from_rfc3339(ts).ok()?;
    Some(HistoryEntry {
        newsletter_id: id.to_string(),
        viewed_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(body: &str) -> Vec<HistoryEntry> {
        let res: HistoryResponse = serde_json::from_str(body).unwrap();
        res.history.normalize()
    }

    #[test]
    fn test_array_encoded_payload() {
        let entries = normalize(r#"{"history": ["5|2025-02-21T10:00:00Z"]}"#);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].newsletter_id, "5");
        assert_eq!(entries[0].viewed_at.to_rfc3339(), "2025-02-21T10:00:00+00:00");
    }

    #[test]
    fn test_string_encoded_payload() {
        let entries = normalize(r#"{"history": "[\"5|2025-02-21T10:00:00Z\"]"}"#);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].newsletter_id, "5");
    }

    #[test]
    fn test_unparseable_string_degrades_to_empty() {
        assert!(normalize(r#"{"history": "not json"}"#).is_empty());
    }

    #[test]
    fn test_missing_field_degrades_to_empty() {
        assert!(normalize(r#"{}"#).is_empty());
    }

    #[test]
    fn test_bad_entries_are_skipped() {
        let entries = normalize(
            r#"{"history": ["no-separator", "|2025-02-21T10:00:00Z", "7|not-a-time", "3|2025-02-22T08:30:00Z"]}"#,
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].newsletter_id, "3");
    }

    #[test]
    fn test_both_shapes_agree() {
        let a = normalize(r#"{"history": ["5|2025-02-21T10:00:00Z", "6|2025-02-22T10:00:00Z"]}"#);
        let b = normalize(
            r#"{"history": "[\"5|2025-02-21T10:00:00Z\", \"6|2025-02-22T10:00:00Z\"]"}"#,
        );
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
    }
}
