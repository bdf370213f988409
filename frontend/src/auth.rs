//! 认证模块
//!
//! 管理会话状态，与路由系统解耦。
//! 路由服务通过注入的会话信号来执行守卫。

use crate::services::AppServices;
use leptos::prelude::*;
use newscase_shared::Session;

/// 认证状态
#[derive(Clone, Default)]
pub struct AuthState {
    /// 当前会话（None 表示未登录）
    pub session: Option<Session>,
    /// 是否正在恢复持久化状态
    pub is_loading: bool,
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext(pub ReadSignal<AuthState>, pub WriteSignal<AuthState>);

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState {
            session: None,
            is_loading: true,
        });
        Self(state, set_state)
    }

    /// 会话信号（用于路由服务注入）
    pub fn session_signal(&self) -> Signal<Option<Session>> {
        let state = self.0;
        Signal::derive(move || state.get().session)
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态：从持久化存储恢复会话
pub fn init_auth(ctx: AuthContext, services: AppServices) {
    let session = services.store.current_session();
    ctx.1.update(|state| {
        state.session = session;
        state.is_loading = false;
    });
}

/// 登录并持久化会话
///
/// # Returns
/// 成功返回 None；失败返回应内联展示的错误消息
pub async fn login(
    ctx: AuthContext,
    services: AppServices,
    backend_url: String,
    email: String,
    password: String,
) -> Option<String> {
    services.set_backend_url(&backend_url);
    let api = services.api();
    match services.store.login(&api, &email, &password).await {
        Ok(session) => {
            ctx.1.update(|state| state.session = Some(session));
            None
        }
        Err(e) => Some(e.message),
    }
}

/// 注销并清除状态
///
/// 导航由路由服务监听会话信号自动处理。
pub fn logout(ctx: AuthContext, services: AppServices) {
    services.store.logout();
    ctx.1.update(|state| state.session = None);
}
