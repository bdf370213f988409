//! Newsletter 详情页
//!
//! 拉取详情并补记一条阅读历史（尽力而为，失败不影响阅读）。

use crate::services::use_services;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use newscase_core::log_error;
use newscase_shared::Newsletter;

#[component]
pub fn NewsletterDetailPage(id: String) -> impl IntoView {
    let services = use_services();
    let router = use_router();

    let (newsletter, set_newsletter) = signal(Option::<Newsletter>::None);
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    {
        let id = id.clone();
        spawn_local(async move {
            match services.api().newsletter(&id).await {
                Ok(item) => {
                    set_newsletter.set(Some(item));
                    // 补记阅读历史，带上模拟日期
                    if let Some(session) = services.store.current_session() {
                        let date = services.clock().current_date();
                        if let Err(e) = services
                            .api()
                            .append_history(&session.user_id, &id, date)
                            .await
                        {
                            log_error!("[Detail] append history failed: {}", e);
                        }
                    }
                }
                Err(e) => set_error_msg.set(Some(e.to_string())),
            }
            set_loading.set(false);
        });
    }

    view! {
        <div class="max-w-4xl mx-auto p-4">
            <button
                class="btn btn-circle btn-primary my-6"
                aria-label="返回面板"
                on:click=move |_| router.navigate("/dashboard")
            >
                "←"
            </button>

            {move || {
                if loading.get() {
                    return view! {
                        <p class="text-center opacity-60">"加载中..."</p>
                    }
                    .into_any();
                }
                match newsletter.get() {
                    Some(item) => {
                        let image = if item.image.is_empty() {
                            None
                        } else {
                            Some(view! {
                                <img
                                    src=item.image.clone()
                                    alt=item.title.clone()
                                    class="w-full h-64 object-cover rounded-md mb-4"
                                />
                            })
                        };
                        view! {
                            <div class="flex flex-col gap-1">
                                {image}
                                <p class="text-lg font-semibold">{item.date.clone()}</p>
                                <h2 class="text-3xl font-bold mt-2">{item.title.clone()}</h2>
                                <p class="text-sm italic opacity-60">
                                    {item.motivational_text.clone()}
                                </p>
                                <div class="space-y-4 mt-4" inner_html=item.content.clone()></div>
                            </div>
                        }
                        .into_any()
                    }
                    None => view! {
                        <p class="text-error text-center">
                            {move || error_msg.get().unwrap_or_else(|| "未找到该期内容。".to_string())}
                        </p>
                    }
                    .into_any(),
                }
            }}
        </div>
    }
}
