//! 核心服务装配
//!
//! 逻辑层服务在进程启动时构造一次，经 Context 按引用传递给所有组件，
//! 不做散落在组件里的全局状态查找。

use crate::web::{FetchClient, LocalStorage};
use leptos::prelude::*;
use newscase_core::adapter::KvStorage;
use newscase_core::api::Api;
use newscase_core::clock::SimulatedClock;
use newscase_core::session::SessionStore;
use newscase_shared::{DEFAULT_BACKEND_URL, KEY_BACKEND_URL};

/// 进程级服务集合
#[derive(Clone, Copy)]
pub struct AppServices {
    /// 后端地址（配置，可在登录页修改）
    backend_url: RwSignal<String>,
    pub store: SessionStore<LocalStorage>,
}

impl AppServices {
    pub fn new() -> Self {
        let url = LocalStorage
            .get(KEY_BACKEND_URL)
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        Self {
            backend_url: RwSignal::new(url),
            store: SessionStore::new(LocalStorage),
        }
    }

    pub fn backend_url(&self) -> String {
        self.backend_url.get_untracked()
    }

    /// 更新并持久化后端地址
    pub fn set_backend_url(&self, url: &str) {
        let url = url.trim_end_matches('/').to_string();
        LocalStorage.set(KEY_BACKEND_URL, &url);
        self.backend_url.set(url);
    }

    /// 当前配置与会话下的 REST 网关
    pub fn api(&self) -> Api<FetchClient> {
        let api = Api::new(self.backend_url.get_untracked(), FetchClient);
        match self.store.current_session() {
            Some(session) => api.with_token(session.token),
            None => api,
        }
    }

    /// 模拟时钟
    pub fn clock(&self) -> SimulatedClock<LocalStorage, FetchClient> {
        SimulatedClock::new(LocalStorage, self.api())
    }
}

/// 从 Context 获取服务集合
pub fn use_services() -> AppServices {
    use_context::<AppServices>().expect("AppServices should be provided")
}
