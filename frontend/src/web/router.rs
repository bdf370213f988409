//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 守卫 -> 处理 -> 加载"的导航流程，
//! 守卫在受保护视图挂载之前完成，不会闪现受保护内容。

use leptos::prelude::*;
use newscase_core::guard::{self, GuardOutcome};
use newscase_shared::Session;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入会话信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 会话状态（注入的信号，守卫的唯一输入）
    session: Signal<Option<Session>>,
}

impl RouterService {
    fn new(session: Signal<Option<Session>>) -> Self {
        // 初始化当前路由（从 URL 解析）
        let path = current_path();
        let initial_route = AppRoute::from_path(&path);
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            session,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 守卫判定 -> 处理 -> 加载
    pub fn navigate(&self, path: &str) {
        let target_route = AppRoute::from_path(path);
        self.navigate_to_route(target_route, true);
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `target_route` - 目标路由
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let session = self.session.get_untracked();

        // --- Step 1: 守卫判定 ---
        let redirect = match guard::check(target_route.access(), session.as_ref()) {
            GuardOutcome::Allow => {
                // 已认证用户访问登录页，转去面板
                if target_route.should_redirect_when_authenticated() && session.is_some() {
                    web_sys::console::log_1(
                        &"[Router] Already authenticated. Redirecting to Dashboard.".into(),
                    );
                    Some(AppRoute::auth_success_redirect())
                } else {
                    None
                }
            }
            GuardOutcome::RedirectLogin => {
                web_sys::console::log_1(&"[Router] Access Denied. Redirecting to Login.".into());
                Some(AppRoute::auth_failure_redirect())
            }
            GuardOutcome::RedirectDashboard => {
                web_sys::console::log_1(&"[Router] Admin only. Redirecting to Dashboard.".into());
                Some(AppRoute::role_failure_redirect())
            }
        };

        // --- Step 2: 加载页面 (更新状态) ---
        let resolved = redirect.unwrap_or(target_route);
        if use_push {
            push_history_state(&resolved.to_path());
        } else {
            replace_history_state(&resolved.to_path());
        }
        self.set_route.set(resolved);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let session = self.session;

        let closure = Closure::<dyn Fn()>::new(move || {
            let path = current_path();
            let target_route = AppRoute::from_path(&path);

            // popstate 时也执行守卫逻辑
            let outcome = guard::check(target_route.access(), session.get_untracked().as_ref());
            let resolved = match outcome {
                GuardOutcome::Allow => target_route.clone(),
                GuardOutcome::RedirectLogin => AppRoute::auth_failure_redirect(),
                GuardOutcome::RedirectDashboard => AppRoute::role_failure_redirect(),
            };
            if resolved != target_route {
                replace_history_state(&resolved.to_path());
            }
            set_route.set(resolved);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置会话状态变化时的自动重定向
    fn setup_session_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let session = self.session;

        // 使用 Effect 监听会话变化（登录/登出/角色变化）
        Effect::new(move |_| {
            let session = session.get();
            let route = current_route.get_untracked();

            if session.is_some() && route.should_redirect_when_authenticated() {
                // 用户刚登录，离开登录页
                let redirect = AppRoute::auth_success_redirect();
                push_history_state(&redirect.to_path());
                set_route.set(redirect);
                web_sys::console::log_1(
                    &"[Router] Session changed: logged in, redirecting to dashboard.".into(),
                );
                return;
            }

            match guard::check(route.access(), session.as_ref()) {
                GuardOutcome::Allow => {}
                GuardOutcome::RedirectLogin => {
                    let redirect = AppRoute::auth_failure_redirect();
                    push_history_state(&redirect.to_path());
                    set_route.set(redirect);
                    web_sys::console::log_1(
                        &"[Router] Session changed: logged out, redirecting to login.".into(),
                    );
                }
                GuardOutcome::RedirectDashboard => {
                    let redirect = AppRoute::role_failure_redirect();
                    push_history_state(&redirect.to_path());
                    set_route.set(redirect);
                }
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(session: Signal<Option<Session>>) -> RouterService {
    let router = RouterService::new(session);

    // 初始路由同样要过守卫（直接输入 URL 进入受保护页面的场景）
    router.navigate_to_route(router.current_route.get_untracked(), false);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话状态信号
    session: Signal<Option<Session>>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    // 提供路由服务到 Context
    provide_router(session);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}
