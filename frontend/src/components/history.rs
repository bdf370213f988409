//! 历史标签页
//!
//! 倒序展示阅读历史，客户端分页。

use crate::auth::{AuthContext, use_auth};
use crate::services::use_services;
use leptos::prelude::*;
use leptos::task::spawn_local;
use newscase_shared::HISTORY_PAGE_SIZE;
use newscase_shared::history::HistoryEntry;

#[component]
pub fn HistoryTab() -> impl IntoView {
    let services = use_services();
    let AuthContext(auth_state, _) = use_auth();

    let (entries, set_entries) = signal(Vec::<HistoryEntry>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (page, set_page) = signal(1usize);

    Effect::new(move |_| {
        let Some(session) = auth_state.get().session else {
            return;
        };
        spawn_local(async move {
            match services.api().history(&session.user_id).await {
                Ok(mut list) => {
                    // 最新在前
                    list.reverse();
                    set_entries.set(list);
                }
                Err(e) => set_error_msg.set(Some(e.to_string())),
            }
            set_loading.set(false);
        });
    });

    let total_pages = move || entries.with(|e| e.len().div_ceil(HISTORY_PAGE_SIZE).max(1));
    let visible = move || {
        entries.with(|e| {
            e.iter()
                .skip((page.get() - 1) * HISTORY_PAGE_SIZE)
                .take(HISTORY_PAGE_SIZE)
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="p-4 bg-base-100 shadow rounded-lg max-w-md mx-auto">
            <h2 class="text-xl font-bold mb-4">"阅读历史"</h2>
            <Show when=move || loading.get()>
                <p class="opacity-60">"加载中..."</p>
            </Show>
            <Show when=move || error_msg.get().is_some()>
                <p class="text-error">{move || error_msg.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || !loading.get() && error_msg.get().is_none()>
                <Show
                    when=move || entries.with(|e| !e.is_empty())
                    fallback=|| view! { <p class="opacity-60">"暂无阅读记录。"</p> }
                >
                    <ul class="divide-y divide-base-300">
                        <For
                            each=visible
                            key=|e| format!("{}|{}", e.newsletter_id, e.viewed_at.to_rfc3339())
                            children=|e| view! {
                                <li class="py-2">
                                    <p>
                                        "第 "
                                        <span class="font-semibold">{e.newsletter_id.clone()}</span>
                                        " 期"
                                    </p>
                                    <p class="text-sm opacity-60">
                                        {e.viewed_at.format("%Y-%m-%d %H:%M").to_string()}
                                    </p>
                                </li>
                            }
                        />
                    </ul>
                    <div class="flex justify-between items-center mt-4">
                        <button
                            class="btn btn-sm"
                            disabled=move || page.get() == 1
                            on:click=move |_| set_page.update(|p| {
                                if *p > 1 {
                                    *p -= 1;
                                }
                            })
                        >
                            "←"
                        </button>
                        <span>{move || format!("{} / {}", page.get(), total_pages())}</span>
                        <button
                            class="btn btn-sm"
                            disabled=move || page.get() >= total_pages()
                            on:click=move |_| {
                                let total = total_pages();
                                set_page.update(|p| {
                                    if *p < total {
                                        *p += 1;
                                    }
                                });
                            }
                        >
                            "→"
                        </button>
                    </div>
                </Show>
            </Show>
        </div>
    }
}
