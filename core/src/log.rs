//! 跨平台日志输出
//!
//! wasm32 下写浏览器 console，原生环境写标准输出/错误，
//! 同一段逻辑代码在浏览器与 tokio 测试里的日志行为一致。

/// 信息级输出
#[cfg(target_arch = "wasm32")]
pub fn info(msg: &str) {
    web_sys::console::log_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn info(msg: &str) {
    println!("{}", msg);
}

/// 错误级输出
#[cfg(target_arch = "wasm32")]
pub fn error(msg: &str) {
    web_sys::console::error_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn error(msg: &str) {
    eprintln!("{}", msg);
}

#[macro_export]
macro_rules! log_info {
    ($($t:tt)*) => ($crate::log::info(&format!($($t)*)))
}

#[macro_export]
macro_rules! log_error {
    ($($t:tt)*) => ($crate::log::error(&format!($($t)*)))
}
