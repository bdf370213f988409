//! 时间机器
//!
//! 模拟日期控制条：前进一天 / 重置回纪元。
//! 模拟日期只在这里变更，其余视图只读。

use crate::auth::{AuthContext, use_auth};
use crate::services::use_services;
use leptos::prelude::*;
use leptos::task::spawn_local;
use newscase_shared::chrono::Weekday;

/// 周几的中文标注
fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "周一",
        Weekday::Tue => "周二",
        Weekday::Wed => "周三",
        Weekday::Thu => "周四",
        Weekday::Fri => "周五",
        Weekday::Sat => "周六",
        Weekday::Sun => "周日",
    }
}

#[component]
pub fn TimeMachine(
    /// 日期变更后的回调（父组件借此刷新内容列表）
    #[prop(into)] on_change: Callback<()>,
) -> impl IntoView {
    let services = use_services();
    let AuthContext(auth_state, _) = use_auth();

    let (sim_date, set_sim_date) = signal(services.clock().current_date());
    let (busy, set_busy) = signal(false);

    let on_next_day = move |_| {
        let Some(session) = auth_state.get_untracked().session else {
            return;
        };
        set_busy.set(true);
        spawn_local(async move {
            let next = services.clock().advance(&session.user_id).await;
            set_sim_date.set(next);
            on_change.run(());
            set_busy.set(false);
        });
    };

    let on_reset = move |_| {
        let Some(session) = auth_state.get_untracked().session else {
            return;
        };
        set_busy.set(true);
        spawn_local(async move {
            let date = services.clock().reset(&session.user_id).await;
            set_sim_date.set(date);
            on_change.run(());
            set_busy.set(false);
        });
    };

    view! {
        <div class="w-full p-3 bg-warning/20 border-b border-base-300 flex items-center justify-center gap-4">
            <span>
                "今天是："
                <span class="font-semibold">{move || sim_date.get().to_string()}</span>
                <span class="opacity-60 ml-1 italic">
                    {move || format!("({})", weekday_label(sim_date.get().weekday()))}
                </span>
            </span>
            <button class="btn btn-success btn-sm" disabled=move || busy.get() on:click=on_next_day>
                "下一天"
            </button>
            <button class="btn btn-error btn-sm" disabled=move || busy.get() on:click=on_reset>
                "重置"
            </button>
        </div>
    }
}
