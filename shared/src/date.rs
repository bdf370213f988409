//! 模拟日期类型
//!
//! 应用的"今天"与真实时钟完全解耦，只由用户操作（前进/重置）驱动。
//! 内容可用性窗口与休息日规则都以此日期为准。

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 与后端交换及持久化统一使用的日期格式
const DATE_FMT: &str = "%Y-%m-%d";

/// 模拟日期（年月日，无时分秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimDate(NaiveDate);

impl SimDate {
    /// 默认纪元：应用重置后的起点
    pub fn epoch() -> Self {
        Self(NaiveDate::from_ymd_opt(2025, 2, 20).unwrap_or_default())
    }

    /// 内容发布窗口下界（含）
    pub fn publish_window_start() -> Self {
        Self(NaiveDate::from_ymd_opt(2025, 2, 21).unwrap_or_default())
    }

    /// 内容发布窗口上界（含）
    pub fn publish_window_end() -> Self {
        Self(NaiveDate::from_ymd_opt(2025, 2, 28).unwrap_or_default())
    }

    /// 解析 "YYYY-MM-DD"；失败返回 None
    pub fn parse(s: &str) -> Option<Self> {
        NaiveDate::parse_from_str(s, DATE_FMT).ok().map(Self)
    }

    /// 前进一天，月末与年末正常进位
    pub fn next_day(self) -> Self {
        // NaiveDate::MAX 之前总是成功
        Self(self.0.succ_opt().unwrap_or(self.0))
    }

    /// 休息日（周日）：当天不发布新内容
    pub fn is_rest_day(&self) -> bool {
        self.0.weekday() == Weekday::Sun
    }

    /// 是否落在固定的内容发布窗口内
    pub fn in_publish_window(&self) -> bool {
        *self >= Self::publish_window_start() && *self <= Self::publish_window_end()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

impl Default for SimDate {
    fn default() -> Self {
        Self::epoch()
    }
}

impl fmt::Display for SimDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FMT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_roundtrip() {
        let d = SimDate::parse("2025-02-20").unwrap();
        assert_eq!(d, SimDate::epoch());
        assert_eq!(d.to_string(), "2025-02-20");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(SimDate::parse("not a date").is_none());
        assert!(SimDate::parse("2025-13-40").is_none());
        assert!(SimDate::parse("").is_none());
    }

    #[test]
    fn test_next_day_simple() {
        let d = SimDate::parse("2025-02-20").unwrap();
        assert_eq!(d.next_day().to_string(), "2025-02-21");
    }

    #[test]
    fn test_next_day_month_rollover() {
        let d = SimDate::parse("2025-02-28").unwrap();
        assert_eq!(d.next_day().to_string(), "2025-03-01");
    }

    #[test]
    fn test_next_day_leap_february() {
        let d = SimDate::parse("2024-02-28").unwrap();
        assert_eq!(d.next_day().to_string(), "2024-02-29");
        assert_eq!(d.next_day().next_day().to_string(), "2024-03-01");
    }

    #[test]
    fn test_next_day_year_rollover() {
        let d = SimDate::parse("2024-12-31").unwrap();
        assert_eq!(d.next_day().to_string(), "2025-01-01");
    }

    #[test]
    fn test_rest_day_is_sunday() {
        // 2025-02-23 是周日
        assert!(SimDate::parse("2025-02-23").unwrap().is_rest_day());
        assert!(!SimDate::parse("2025-02-24").unwrap().is_rest_day());
    }

    #[test]
    fn test_publish_window_bounds() {
        assert!(!SimDate::parse("2025-02-20").unwrap().in_publish_window());
        assert!(SimDate::parse("2025-02-21").unwrap().in_publish_window());
        assert!(SimDate::parse("2025-02-28").unwrap().in_publish_window());
        assert!(!SimDate::parse("2025-03-01").unwrap().in_publish_window());
    }

    #[test]
    fn test_serde_as_plain_string() {
        let d = SimDate::parse("2025-02-21").unwrap();
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"2025-02-21\"");
        let back: SimDate = serde_json::from_str("\"2025-02-21\"").unwrap();
        assert_eq!(back, d);
    }
}
