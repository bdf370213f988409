//! 用户工具栏
//!
//! 头像（按版本号失效重拉）、邮箱卡片、管理入口、登出。

use crate::auth::{self, AuthContext, use_auth};
use crate::components::icons::LogOut;
use crate::services::use_services;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use newscase_core::log_error;

#[component]
pub fn UserToolbar(
    /// 头像变更版本号，变化即触发重新拉取头像图片
    avatar_version: ReadSignal<u32>,
) -> impl IntoView {
    let services = use_services();
    let auth_ctx = use_auth();
    let AuthContext(auth_state, _) = auth_ctx;
    let router = use_router();

    let (email, set_email) = signal(Option::<String>::None);
    let (show_card, set_show_card) = signal(false);

    let is_admin = move || {
        auth_state
            .get()
            .session
            .map(|s| s.is_admin())
            .unwrap_or(false)
    };

    // 版本号拼在查询串里，版本一变浏览器必然重新请求图片
    let avatar_url = move || {
        auth_state
            .get()
            .session
            .map(|s| services.api().avatar_image_url(&s.user_id, avatar_version.get()))
    };

    let on_avatar_click = move |_| {
        set_show_card.update(|v| *v = !*v);
        // 邮箱按需懒加载，只拉一次
        if email.get_untracked().is_none() {
            let Some(session) = auth_state.get_untracked().session else {
                return;
            };
            spawn_local(async move {
                match services.api().email(&session.user_id).await {
                    Ok(addr) => set_email.set(Some(addr)),
                    Err(e) => log_error!("[Toolbar] email fetch failed: {}", e),
                }
            });
        }
    };

    let on_logout = move |_| {
        auth::logout(auth_ctx, services);
        router.navigate("/");
    };

    view! {
        <div class="flex gap-2 justify-end items-center">
            <Show when=is_admin>
                <button on:click=move |_| router.navigate("/admin") class="btn btn-outline btn-sm">
                    "管理"
                </button>
            </Show>
            <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-1">
                <LogOut attr:class="h-4 w-4" />
                "登出"
            </button>
            <div class="relative">
                {move || avatar_url().map(|url| view! {
                    <img
                        src=url
                        alt="用户头像"
                        class="h-12 w-12 rounded-full cursor-pointer"
                        on:click=on_avatar_click
                    />
                })}
                <Show when=move || show_card.get()>
                    <div class="absolute z-50 top-full right-0 bg-base-100 p-4 shadow rounded-md mt-2 w-56 text-center">
                        <p class="font-semibold">
                            {move || email.get().unwrap_or_else(|| "加载邮箱中...".to_string())}
                        </p>
                    </div>
                </Show>
            </div>
        </div>
    }
}
