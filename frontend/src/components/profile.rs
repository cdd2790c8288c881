use admin_console_shared::Profile;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{use_api, use_auth, use_config};
use crate::components::chart::{Bar, BarChart};
use crate::error::{ApiError, ApiResult};
use crate::fetch::{FetchGate, LoadState};

const PROFILE_FETCH_FAILED: &str = "Failed to fetch profile data";

/// 挂载时的初始状态：没有令牌直接进入终止错误，不发请求
fn initial_state(token: Option<&str>) -> LoadState<Profile> {
    match token {
        Some(_) => LoadState::Loading,
        None => LoadState::Errored(ApiError::AuthMissing.to_string()),
    }
}

/// 请求结束后的状态，失败的具体原因只记录日志
fn settle(result: ApiResult<Profile>) -> LoadState<Profile> {
    match result {
        Ok(profile) => LoadState::Ready(profile),
        Err(e) => {
            log::error!("[Profile] error fetching profile data: {}", e);
            LoadState::Errored(PROFILE_FETCH_FAILED.to_string())
        }
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let reveal_delay = use_config().reveal_delay;

    let (profile, set_profile) = signal(LoadState::<Profile>::Idle);
    // 卡片淡入，与数据是否到达无关
    let (show_card, set_show_card) = signal(false);

    let gate = FetchGate::new();
    on_cleanup({
        let gate = gate.clone();
        move || gate.invalidate()
    });

    // 挂载时获取一次
    let token = auth.session.with_untracked(|s| s.token().map(str::to_owned));
    set_profile.set(initial_state(token.as_deref()));
    if let Some(token) = token {
        let ticket = gate.begin();
        spawn_local(async move {
            let result = api.fetch_profile(&token).await;
            if gate.is_current(ticket) {
                set_profile.set(settle(result));
            }
        });
    }

    if let Ok(handle) = set_timeout_with_handle(move || set_show_card.set(true), reveal_delay) {
        on_cleanup(move || handle.clear());
    }

    let stats = Signal::derive(move || {
        let stats = profile.with(|p| p.ready().map(|p| p.stats).unwrap_or_default());
        vec![
            Bar::new("Active", stats.active, "bg-success"),
            Bar::new("Inactive", stats.inactive, "bg-error"),
        ]
    });
    let visible = Signal::from(show_card);

    move || {
        if let Some(msg) = profile.with(|p| p.error().map(str::to_owned)) {
            return view! {
                <div class="flex items-center justify-center min-h-screen">
                    <div role="alert" class="alert alert-error max-w-md">
                        <span>{msg}</span>
                    </div>
                </div>
            }
            .into_any();
        }

        view! {
            <div class="min-h-screen bg-base-200 p-4 md:p-8">
                <div class="max-w-5xl mx-auto grid gap-8 md:grid-cols-2">
                    <div class=move || {
                        if show_card.get() {
                            "card bg-base-100 shadow-xl transition-all duration-500 scale-100 opacity-100"
                        } else {
                            "card bg-base-100 shadow-xl transition-all duration-500 scale-90 opacity-0"
                        }
                    }>
                        <div class="card-body items-center text-center">
                            {move || match profile.with(|p| p.ready().map(|p| p.user.clone())) {
                                Some(user) => view! {
                                    <h2 class="card-title">{user.username}</h2>
                                    <p class="opacity-70">{user.email}</p>
                                    <p><strong>"Role: "</strong>{user.role.to_string()}</p>
                                }
                                .into_any(),
                                None => view! {
                                    <span class="loading loading-spinner loading-md text-primary"></span>
                                }
                                .into_any(),
                            }}
                        </div>
                    </div>

                    <BarChart title="User Activity" bars=stats visible=visible />
                </div>
            </div>
        }
        .into_any()
    }
}
