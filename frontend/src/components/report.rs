//! 当前身份的摘要报告

use leptos::prelude::*;

use crate::auth::use_auth;

#[component]
pub fn ReportPage() -> impl IntoView {
    let auth = use_auth();
    let identity = Memo::new(move |_| auth.session.with(|s| s.identity().cloned()));

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-3xl mx-auto card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h2 class="card-title">"Account Report"</h2>
                    {move || match identity.get() {
                        Some(user) => view! {
                            <div class="stats stats-vertical md:stats-horizontal shadow">
                                <div class="stat">
                                    <div class="stat-title">"Username"</div>
                                    <div class="stat-value text-lg">{user.username}</div>
                                </div>
                                <div class="stat">
                                    <div class="stat-title">"Email"</div>
                                    <div class="stat-value text-lg">{user.email}</div>
                                </div>
                                <div class="stat">
                                    <div class="stat-title">"Role"</div>
                                    <div class="stat-value text-lg">{user.role.to_string()}</div>
                                </div>
                                <div class="stat">
                                    <div class="stat-title">"Status"</div>
                                    <div class="stat-value text-lg">
                                        {if user.active { "Active" } else { "Inactive" }}
                                    </div>
                                </div>
                            </div>
                        }
                        .into_any(),
                        None => view! { <p class="opacity-70">"No session."</p> }.into_any(),
                    }}
                </div>
            </div>
        </div>
    }
}
