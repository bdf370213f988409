//! 用户面板
//!
//! 三个互斥标签页（内容 / 历史 / 进度）。标签切换是纯客户端状态，
//! 守卫已在路由层完成，这里不再做任何权限判断。

use crate::auth::{AuthContext, use_auth};
use crate::components::history::HistoryTab;
use crate::components::icons::RefreshCw;
use crate::components::progress::ProgressTab;
use crate::components::time_machine::TimeMachine;
use crate::components::toolbar::UserToolbar;
use crate::services::use_services;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use newscase_shared::Newsletter;
use std::time::Duration;

/// 面板标签页
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Newsletters,
    History,
    Progress,
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let services = use_services();
    let AuthContext(auth_state, _) = use_auth();
    let router = use_router();

    let (active_tab, set_active_tab) = signal(Tab::Newsletters);
    let (newsletters, set_newsletters) = signal(Vec::<Newsletter>::new());
    let (loading, set_loading) = signal(true);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None); // 消息内容, 是否出错
    // 头像变更计数器：工具栏借此强制重新拉取头像图片
    let (avatar_version, set_avatar_version) = signal(0u32);

    let load_newsletters = move || {
        set_loading.set(true);
        spawn_local(async move {
            match services.api().newsletters().await {
                Ok(mut list) => {
                    // 最新一期在前
                    list.sort_by(|a, b| b.date.cmp(&a.date));
                    set_newsletters.set(list);
                }
                Err(e) => set_notification.set(Some((format!("加载内容失败: {}", e), true))),
            }
            set_loading.set(false);
        });
    };

    // 初始加载
    Effect::new(move |_| {
        if auth_state.get().session.is_some() {
            load_newsletters();
        }
    });

    // 3 秒后清除通知
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                Duration::from_secs(3),
            );
        }
    });

    let tab_class = move |tab: Tab| {
        if active_tab.get() == tab {
            "btn btn-primary m-2 w-36"
        } else {
            "btn btn-ghost m-2 w-36"
        }
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <TimeMachine on_change=Callback::new(move |_| load_newsletters()) />

            <div class="max-w-5xl mx-auto p-4 space-y-6">
                // 通知提示框
                <Show when=move || notification.get().is_some()>
                    <div class="toast toast-top toast-end z-50">
                        <div class=move || {
                            if notification.get().map(|(_, is_err)| is_err).unwrap_or(false) {
                                "alert alert-error shadow-lg"
                            } else {
                                "alert alert-success shadow-lg"
                            }
                        }>
                            <span>{move || notification.get().map(|(msg, _)| msg).unwrap_or_default()}</span>
                        </div>
                    </div>
                </Show>

                <div class="flex justify-between items-center">
                    <h1 class="text-2xl font-bold">"the news Case"</h1>
                    <UserToolbar avatar_version=avatar_version />
                </div>

                // 标签页切换
                <div class="flex flex-wrap justify-center">
                    <button
                        on:click=move |_| set_active_tab.set(Tab::Newsletters)
                        class=move || tab_class(Tab::Newsletters)
                    >
                        "内容"
                    </button>
                    <button
                        on:click=move |_| set_active_tab.set(Tab::History)
                        class=move || tab_class(Tab::History)
                    >
                        "历史"
                    </button>
                    <button
                        on:click=move |_| set_active_tab.set(Tab::Progress)
                        class=move || tab_class(Tab::Progress)
                    >
                        "进度"
                    </button>
                </div>

                // 标签页内容
                {move || match active_tab.get() {
                    Tab::Newsletters => view! {
                        <div>
                            <div class="flex items-center justify-between px-1">
                                <h2 class="text-xl font-semibold">"往期内容"</h2>
                                <button
                                    on:click=move |_| load_newsletters()
                                    disabled=move || loading.get()
                                    class="btn btn-ghost btn-circle"
                                >
                                    <RefreshCw attr:class=move || if loading.get() {
                                        "h-5 w-5 animate-spin"
                                    } else {
                                        "h-5 w-5"
                                    } />
                                </button>
                            </div>
                            <Show when=move || loading.get() && newsletters.with(Vec::is_empty)>
                                <p class="text-center py-8 opacity-60">
                                    <span class="loading loading-spinner loading-md"></span>
                                    " 加载中..."
                                </p>
                            </Show>
                            <Show when=move || !loading.get() && newsletters.with(Vec::is_empty)>
                                <p class="text-center py-8 opacity-60">
                                    "暂无内容，试试时间机器的「下一天」。"
                                </p>
                            </Show>
                            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4">
                                <For
                                    each=move || newsletters.get()
                                    key=|n| n.id
                                    children=move |n| {
                                        let path = format!("/newsletter/{}", n.id);
                                        let image = if n.image.is_empty() {
                                            None
                                        } else {
                                            Some(view! {
                                                <img
                                                    src=n.image.clone()
                                                    alt=n.title.clone()
                                                    class="h-40 w-full object-cover rounded-t"
                                                />
                                            })
                                        };
                                        view! {
                                            <div
                                                class="card bg-base-100 shadow cursor-pointer hover:shadow-lg transition"
                                                on:click=move |_| router.navigate(&path)
                                            >
                                                {image}
                                                <div class="card-body p-4">
                                                    <p class="text-sm opacity-60">{n.date.clone()}</p>
                                                    <h3 class="card-title text-base">{n.title.clone()}</h3>
                                                </div>
                                            </div>
                                        }
                                    }
                                />
                            </div>
                        </div>
                    }
                    .into_any(),
                    Tab::History => view! { <HistoryTab /> }.into_any(),
                    Tab::Progress => view! {
                        <ProgressTab on_avatar_change=Callback::new(move |_| {
                            set_avatar_version.update(|v| *v += 1)
                        }) />
                    }
                    .into_any(),
                }}
            </div>
        </div>
    }
}
