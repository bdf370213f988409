//! 模拟时钟
//!
//! 应用的"今天"只由用户操作驱动：前进一天或重置回纪元。
//! 前进时的副作用顺序是硬性约束：对旧日期的打卡检查必须先于
//! 新日期落盘，连点时检查的才始终是持久化状态里的日期。

use crate::adapter::KvStorage;
use crate::api::Api;
use crate::request::HttpClient;
use crate::{log_error, log_info};
use newscase_shared::KEY_SIM_DATE;
use newscase_shared::date::SimDate;

#[cfg(test)]
mod tests;

/// 模拟时钟
pub struct SimulatedClock<S, C> {
    storage: S,
    api: Api<C>,
}

impl<S: KvStorage, C: HttpClient> SimulatedClock<S, C> {
    pub fn new(storage: S, api: Api<C>) -> Self {
        Self { storage, api }
    }

    /// 当前模拟日期；缺失或损坏时回落到纪元
    pub fn current_date(&self) -> SimDate {
        self.storage
            .get(KEY_SIM_DATE)
            .and_then(|s| SimDate::parse(&s))
            .unwrap_or_else(SimDate::epoch)
    }

    /// 前进一天
    ///
    /// 1. 对被离开的旧日期调用打卡检查。无论星期几都调用，
    ///    休息日豁免由后端判定；失败记日志后继续。
    /// 2. 检查结束后才提交新日期。
    /// 3. 新日期落在发布窗口内且不是休息日时，请求发布当日内容。
    pub async fn advance(&self, user_id: &str) -> SimDate {
        let leaving = self.current_date();

        match self.api.check_streak(user_id, leaving).await {
            Ok(message) => log_info!("[Clock] check-streak {}: {}", leaving, message),
            Err(e) => log_error!("[Clock] check-streak {} failed: {}", leaving, e),
        }

        let next = leaving.next_day();
        self.storage.set(KEY_SIM_DATE, &next.to_string());

        if next.in_publish_window() && !next.is_rest_day() {
            if let Err(e) = self.api.publish_newsletter(next).await {
                log_error!("[Clock] publish {} failed: {}", next, e);
            }
        }

        next
    }

    /// 重置回纪元
    ///
    /// 新日期立即落盘——无论清理成败它都是权威值。
    /// 三个清理请求并发发出，互不短路，失败各自记日志。幂等。
    pub async fn reset(&self, user_id: &str) -> SimDate {
        let epoch = SimDate::epoch();
        self.storage.set(KEY_SIM_DATE, &epoch.to_string());

        let (newsletters, history, progress) = futures::join!(
            self.api.delete_newsletters_after(epoch),
            self.api.delete_history(user_id),
            self.api.delete_progress(user_id),
        );
        if let Err(e) = newsletters {
            log_error!("[Clock] cleanup newsletters failed: {}", e);
        }
        if let Err(e) = history {
            log_error!("[Clock] cleanup history failed: {}", e);
        }
        if let Err(e) = progress {
            log_error!("[Clock] cleanup progress failed: {}", e);
        }

        epoch
    }
}
