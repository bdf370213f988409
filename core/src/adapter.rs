//! 持久化存储适配器
//!
//! 浏览器 LocalStorage 是同步接口，适配器保持同步语义。
//! 并发写入按"同一时刻单写者"的约定处理，存储层最后写入生效。

/// 键值存储抽象
pub trait KvStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
    /// 清空全部持久化状态（登出时整体清除会话与派生状态）
    fn clear(&self);
}

// =========================================================
// 测试实现 (Mock)
// =========================================================
