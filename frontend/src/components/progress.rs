//! 进度标签页
//!
//! 激活时立即拉一次进度，之后按固定间隔轮询；
//! 轮询任务与视图同生命周期，视图卸载即取消，不会给已卸载的视图写状态。

use crate::auth::{AuthContext, use_auth};
use crate::services::use_services;
use crate::web::{FetchClient, Interval};
use leptos::prelude::*;
use leptos::task::spawn_local;
use newscase_core::progress::{ProgressEngine, ProgressSnapshot};
use newscase_shared::PROGRESS_POLL_MILLIS;
use newscase_shared::avatar::{self, motivational_message};

#[component]
pub fn ProgressTab(
    /// 头像变更回调（父组件递增版本号，工具栏重新拉取头像）
    #[prop(into)] on_avatar_change: Callback<()>,
) -> impl IntoView {
    let services = use_services();
    let AuthContext(auth_state, _) = use_auth();

    let user_id = auth_state
        .get_untracked()
        .session
        .map(|s| s.user_id)
        .unwrap_or_default();
    // 引擎持有 Rc 共享缓存，放进线程本地的 StoredValue 供各处取用
    let engine = StoredValue::new_local(ProgressEngine::<FetchClient>::new(
        services.api(),
        user_id,
    ));

    let (snapshot, set_snapshot) = signal(Option::<ProgressSnapshot>::None);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let poll = move || {
        let engine = engine.get_value();
        spawn_local(async move {
            match engine.poll_status().await {
                Ok(snap) => {
                    set_snapshot.set(Some(snap));
                    set_error_msg.set(None);
                }
                // 拉取失败保留旧数据，只挂出错误条
                Err(e) => set_error_msg.set(Some(e.to_string())),
            }
        });
    };

    // 激活时立即拉一次，然后进入固定轮询；
    // 定时器随视图 owner 一起销毁，drop 时自动清除
    poll();
    StoredValue::new_local(Interval::new(PROGRESS_POLL_MILLIS, poll));

    let on_select = move |avatar_id: String| {
        let engine = engine.get_value();
        spawn_local(async move {
            match engine.select_avatar(&avatar_id).await {
                Ok(()) => {
                    set_snapshot.set(Some(engine.cached()));
                    on_avatar_change.run(());
                }
                Err(e) if e.is_policy() => {
                    // 静默拒绝：未解锁的按钮本就不可点
                }
                Err(e) => {
                    // 持久化失败：乐观选择保留，不回滚
                    set_snapshot.set(Some(engine.cached()));
                    on_avatar_change.run(());
                    set_error_msg.set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <div class="space-y-6 max-w-2xl mx-auto">
            <Show when=move || error_msg.get().is_some()>
                <div class="alert alert-error text-sm py-2">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            {move || match snapshot.get() {
                None => view! {
                    <p class="text-center py-8 opacity-60">"加载进度中..."</p>
                }
                .into_any(),
                Some(snap) => {
                    let highscore = snap.highscore;
                    let selected = snap.avatar_id.clone();
                    view! {
                        <div class="stats shadow w-full bg-base-100">
                            <div class="stat">
                                <div class="stat-title">"当前连续"</div>
                                <div class="stat-value text-primary">{snap.streak}</div>
                                <div class="stat-desc">{motivational_message(snap.streak)}</div>
                            </div>
                            <div class="stat">
                                <div class="stat-title">"历史最高"</div>
                                <div class="stat-value">{snap.highscore}</div>
                            </div>
                        </div>

                        <div class="card bg-base-100 shadow">
                            <div class="card-body">
                                <h3 class="card-title">"头像"</h3>
                                <div class="grid grid-cols-2 sm:grid-cols-5 gap-3">
                                    {avatar::AVATARS
                                        .iter()
                                        .map(|a| {
                                            let unlocked = a.threshold <= highscore;
                                            let is_selected = a.id == selected;
                                            let id = a.id;
                                            let class = if is_selected {
                                                "flex flex-col items-center gap-1 p-2 rounded border-2 border-primary"
                                            } else if unlocked {
                                                "flex flex-col items-center gap-1 p-2 rounded border border-base-300 hover:border-primary cursor-pointer"
                                            } else {
                                                "flex flex-col items-center gap-1 p-2 rounded border border-base-300 opacity-40"
                                            };
                                            view! {
                                                <button
                                                    class=class
                                                    disabled=!unlocked
                                                    title=a.description
                                                    on:click=move |_| on_select(id.to_string())
                                                >
                                                    <img src=a.image alt=a.description class="h-12 w-12" />
                                                    <span class="text-xs">
                                                        {if unlocked {
                                                            a.description.to_string()
                                                        } else {
                                                            format!("需 {} 天", a.threshold)
                                                        }}
                                                    </span>
                                                </button>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            </div>
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
