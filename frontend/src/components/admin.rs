//! 管理面板
//!
//! 三个标签页：排行榜 / 指标 / 统计。图表库不在范围内，
//! 统计数据以表格呈现。

use crate::services::use_services;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use newscase_shared::{
    CampaignEffectivenessRow, LeaderboardRow, MetricUser, MostViewedNewsletter,
    SourceDistributionRow,
};

/// 管理面板标签页
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminTab {
    Leaderboard,
    Metrics,
    Statistics,
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let router = use_router();
    let (active_tab, set_active_tab) = signal(AdminTab::Leaderboard);

    let tab_class = move |tab: AdminTab| {
        if active_tab.get() == tab {
            "btn btn-primary m-2 w-36"
        } else {
            "btn btn-ghost m-2 w-36"
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4">
            <div class="max-w-5xl mx-auto space-y-6">
                <button class="btn btn-ghost" on:click=move |_| router.navigate("/dashboard")>
                    "← 返回用户面板"
                </button>
                <h1 class="text-2xl font-bold text-center">"管理面板"</h1>

                <div class="flex justify-center">
                    <button
                        on:click=move |_| set_active_tab.set(AdminTab::Leaderboard)
                        class=move || tab_class(AdminTab::Leaderboard)
                    >
                        "排行榜"
                    </button>
                    <button
                        on:click=move |_| set_active_tab.set(AdminTab::Metrics)
                        class=move || tab_class(AdminTab::Metrics)
                    >
                        "指标"
                    </button>
                    <button
                        on:click=move |_| set_active_tab.set(AdminTab::Statistics)
                        class=move || tab_class(AdminTab::Statistics)
                    >
                        "统计"
                    </button>
                </div>

                {move || match active_tab.get() {
                    AdminTab::Leaderboard => view! { <LeaderboardTab /> }.into_any(),
                    AdminTab::Metrics => view! { <MetricsTab /> }.into_any(),
                    AdminTab::Statistics => view! { <StatisticsTab /> }.into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn LeaderboardTab() -> impl IntoView {
    let services = use_services();
    let (rows, set_rows) = signal(Vec::<LeaderboardRow>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    spawn_local(async move {
        match services.api().leaderboard().await {
            Ok(data) => set_rows.set(data),
            Err(e) => set_error_msg.set(Some(e.to_string())),
        }
        set_loading.set(false);
    });

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">"排行榜"</h2>
                <Show when=move || loading.get()>
                    <p class="opacity-60">"加载中..."</p>
                </Show>
                <Show when=move || error_msg.get().is_some()>
                    <p class="text-error">{move || error_msg.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || !loading.get() && error_msg.get().is_none()>
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"名次"</th>
                                <th>"邮箱"</th>
                                <th>"历史最高分"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || rows
                                .get()
                                .into_iter()
                                .enumerate()
                                .map(|(i, row)| view! {
                                    <tr>
                                        <td>{i + 1}</td>
                                        <td>{row.email}</td>
                                        <td>{row.highscore}</td>
                                    </tr>
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn MetricsTab() -> impl IntoView {
    let services = use_services();
    let (most_viewed, set_most_viewed) = signal(Option::<MostViewedNewsletter>::None);
    let (top_streak, set_top_streak) = signal(Option::<MetricUser>::None);
    let (top_highscore, set_top_highscore) = signal(Option::<MetricUser>::None);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    spawn_local(async move {
        let api = services.api();
        let (newsletter, streak_user, highscore_user) = futures::join!(
            api.most_viewed_newsletter(),
            api.highest_streak_user(),
            api.highest_highscore_user(),
        );
        // 三个指标独立成败，能显示多少显示多少
        match newsletter {
            Ok(v) => set_most_viewed.set(Some(v)),
            Err(e) => set_error_msg.set(Some(e.to_string())),
        }
        match streak_user {
            Ok(v) => set_top_streak.set(Some(v)),
            Err(e) => set_error_msg.set(Some(e.to_string())),
        }
        match highscore_user {
            Ok(v) => set_top_highscore.set(Some(v)),
            Err(e) => set_error_msg.set(Some(e.to_string())),
        }
    });

    view! {
        <div class="space-y-4">
            <Show when=move || error_msg.get().is_some()>
                <div class="alert alert-error text-sm py-2">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>
            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <div class="stat">
                    <div class="stat-title">"阅读量最高的一期"</div>
                    <div class="stat-value text-lg">
                        {move || most_viewed.get().map(|n| n.title).unwrap_or_else(|| "—".to_string())}
                    </div>
                    <div class="stat-desc">
                        {move || most_viewed.get().map(|n| format!("{} 次阅读", n.views)).unwrap_or_default()}
                    </div>
                </div>
                <div class="stat">
                    <div class="stat-title">"当前最长连续"</div>
                    <div class="stat-value text-lg">
                        {move || top_streak.get().map(|u| u.email).unwrap_or_else(|| "—".to_string())}
                    </div>
                    <div class="stat-desc">
                        {move || top_streak.get().map(|u| format!("{} 天", u.streak)).unwrap_or_default()}
                    </div>
                </div>
                <div class="stat">
                    <div class="stat-title">"历史最高分"</div>
                    <div class="stat-value text-lg">
                        {move || top_highscore.get().map(|u| u.email).unwrap_or_else(|| "—".to_string())}
                    </div>
                    <div class="stat-desc">
                        {move || top_highscore.get().map(|u| format!("{} 天", u.highscore)).unwrap_or_default()}
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
fn StatisticsTab() -> impl IntoView {
    let services = use_services();
    let (sources, set_sources) = signal(Vec::<SourceDistributionRow>::new());
    let (campaigns, set_campaigns) = signal(Vec::<CampaignEffectivenessRow>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    spawn_local(async move {
        let api = services.api();
        let (dist, eff) = futures::join!(api.user_distribution(), api.campaign_effectiveness());
        match dist {
            // 来源为空的行不展示
            Ok(data) => set_sources.set(data.into_iter().filter(|r| !r.source.is_empty()).collect()),
            Err(e) => set_error_msg.set(Some(e.to_string())),
        }
        match eff {
            Ok(data) => set_campaigns.set(
                data.into_iter()
                    .filter(|r| r.campaign.as_deref().is_some_and(|c| !c.trim().is_empty()))
                    .collect(),
            ),
            Err(e) => set_error_msg.set(Some(e.to_string())),
        }
        set_loading.set(false);
    });

    view! {
        <div class="space-y-6">
            <Show when=move || loading.get()>
                <p class="text-center opacity-60">"加载中..."</p>
            </Show>
            <Show when=move || error_msg.get().is_some()>
                <div class="alert alert-error text-sm py-2">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h3 class="card-title">"用户来源分布 (UTM source)"</h3>
                    <p class="text-sm opacity-60">"各订阅来源的用户数量。"</p>
                    <table class="table w-full">
                        <thead>
                            <tr>
                                <th>"来源"</th>
                                <th>"用户数"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || sources
                                .get()
                                .into_iter()
                                .map(|row| view! {
                                    <tr>
                                        <td>{row.source}</td>
                                        <td>{row.user_count}</td>
                                    </tr>
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h3 class="card-title">"活动效果"</h3>
                    <p class="text-sm opacity-60">"按来源活动分组的平均历史最高分。"</p>
                    <table class="table w-full">
                        <thead>
                            <tr>
                                <th>"活动"</th>
                                <th>"平均最高分"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || campaigns
                                .get()
                                .into_iter()
                                .map(|row| view! {
                                    <tr>
                                        <td>{row.campaign.clone().unwrap_or_default()}</td>
                                        <td>{format!("{:.1}", row.average_highscore)}</td>
                                    </tr>
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}
