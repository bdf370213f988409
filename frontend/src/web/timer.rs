//! 定时器封装模块
//!
//! 封装 `setInterval` API。`Interval` 被 drop 时自动清除定时器，
//! 轮询任务因此与持有它的视图同生命周期。

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// 周期性定时器
pub struct Interval {
    handle: i32,
    #[allow(dead_code)]
    closure: Closure<dyn Fn()>,
}

impl Interval {
    /// 创建新的周期性定时器
    ///
    /// # 参数
    /// - `millis`: 间隔时间（毫秒）
    /// - `callback`: 每次间隔触发的回调函数
    pub fn new<F>(millis: u32, callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        let closure = Closure::new(callback);
        let handle = web_sys::window()
            .and_then(|w| {
                w.set_interval_with_callback_and_timeout_and_arguments_0(
                    closure.as_ref().unchecked_ref(),
                    millis as i32,
                )
                .ok()
            })
            .unwrap_or(-1);

        Self { handle, closure }
    }

    /// 取消定时器
    ///
    /// 通常不需要手动调用，drop 时会自动清除。
    pub fn cancel(&self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}
