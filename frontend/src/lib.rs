//! newscase 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（守卫引擎）
//! - `auth`: 认证状态管理
//! - `services`: 核心逻辑服务的统一装配（进程启动时构造一次）
//! - `components`: UI 组件层

mod auth;
mod components {
    pub mod admin;
    pub mod dashboard;
    pub mod history;
    mod icons;
    pub mod login;
    pub mod newsletter_detail;
    pub mod progress;
    mod time_machine;
    mod toolbar;
}
mod services;

use crate::auth::{AuthContext, init_auth};
use crate::components::admin::AdminPage;
use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;
use crate::components::newsletter_detail::NewsletterDetailPage;
use crate::services::AppServices;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;
    mod storage;
    mod timer;

    pub use http::FetchClient;
    pub use storage::LocalStorage;
    pub use timer::Interval;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Newsletter(id) => view! { <NewsletterDetailPage id=id /> }.into_any(),
        AppRoute::Admin => view! { <AdminPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 装配核心服务（进程内唯一一份）
    let services = AppServices::new();
    provide_context(services);

    // 2. 认证上下文：从持久化状态恢复会话
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    init_auth(auth_ctx, services);

    // 3. 会话信号注入路由服务，实现守卫与认证系统解耦
    let session = auth_ctx.session_signal();

    view! {
        <Router session=session>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
