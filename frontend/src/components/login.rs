use crate::auth::{self, AuthContext, use_auth};
use crate::components::icons::Coffee;
use crate::services::use_services;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth_ctx = use_auth();
    let AuthContext(auth_state, _) = auth_ctx;
    let services = use_services();
    let router = use_router();

    let (backend_url, set_backend_url) = signal(services.backend_url());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 已认证则直接进入面板
    Effect::new(move |_| {
        let state = auth_state.get();
        if !state.is_loading && state.session.is_some() {
            router.navigate("/dashboard");
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("请填写邮箱和密码".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let err = auth::login(
                auth_ctx,
                services,
                backend_url.get_untracked(),
                email.get_untracked(),
                password.get_untracked(),
            )
            .await;
            match err {
                None => router.navigate("/dashboard"),
                Some(msg) => set_error_msg.set(Some(msg)),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Coffee attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"the news Case"</h1>
                        <p class="text-base-content/70">"登录以继续阅读"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="backend-url">
                                <span class="label-text">"后端地址"</span>
                            </label>
                            <input
                                id="backend-url"
                                type="text"
                                placeholder="http://localhost:3001"
                                on:input=move |ev| set_backend_url.set(event_target_value(&ev))
                                prop:value=backend_url
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"邮箱"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="请输入邮箱"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"密码"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "登录中..." }.into_any()
                                } else {
                                    "登录".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
