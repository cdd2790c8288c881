use admin_console_shared::{MockExternalUser, User};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{use_api, use_auth, use_config};
use crate::components::chart::{Bar, BarChart, sample_activity};
use crate::fetch::{FetchGate, LoadState};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

mod edit_form;
pub mod table_state;

use edit_form::EditUserForm;
use table_state::{
    Column, MockColumn, Pagination, SortState, UserColumn, merge_results, row_key, visible_users,
};

/// 阻塞式提示框
fn alert(msg: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(msg);
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let api = StoredValue::new(use_api());
    let page_size = use_config().page_size;
    let router = use_router();

    let (registered, set_registered) = signal(Vec::<User>::new());
    let (mock_users, set_mock_users) = signal(Vec::<MockExternalUser>::new());
    let (pagination, set_pagination) = signal(Pagination::new(page_size));
    let (status, set_status) = signal(LoadState::<()>::Idle);
    let (search, set_search) = signal(String::new());
    let (sort, set_sort) = signal(SortState::<UserColumn>::default());
    let (mock_sort, set_mock_sort) = signal(SortState::<MockColumn>::default());
    // 编辑成功后递增以触发重新获取
    let (refresh, set_refresh) = signal(0u32);
    let edit_form = EditUserForm::new();

    let gate = FetchGate::new();
    on_cleanup({
        let gate = gate.clone();
        move || gate.invalidate()
    });

    let page = Memo::new(move |_| pagination.with(|p| p.page));

    // 翻页 / 刷新时并发获取两份数据，任一失败只记录日志
    Effect::new(move |_| {
        let page = page.get();
        refresh.track();

        let Some(token) = auth.token() else {
            log::warn!("[Dashboard] no token, redirecting to login");
            router.navigate(AppRoute::Login.to_path());
            return;
        };

        let api = api.get_value();
        let gate = gate.clone();
        let ticket = gate.begin();
        set_status.set(LoadState::Loading);

        spawn_local(async move {
            let (users_res, mock_res) = futures::join!(
                api.fetch_registered_users(&token, page, page_size),
                api.fetch_external_mock_users(page, page_size),
            );

            if !gate.is_current(ticket) {
                log::debug!("[Dashboard] discarding stale results for page {}", page);
                return;
            }

            let update = merge_results(users_res, mock_res);
            if let Some(list) = update.users {
                set_registered.set(list.users);
                set_pagination.update(|p| p.total = list.total);
            }
            if let Some(mock) = update.mock_users {
                set_mock_users.set(mock.users);
            }
            set_status.set(update.status);
        });
    });

    let shown_users = Memo::new(move |_| {
        registered.with(|users| search.with(|term| sort.with(|s| visible_users(users, term, s))))
    });
    let shown_mock_users = move || mock_sort.with(|s| mock_users.with(|rows| s.sorted(rows)));

    let activity = Signal::derive(move || {
        mock_users.with(|rows| {
            rows.iter()
                .map(|u| Bar::new(u.name.clone(), sample_activity(u.id), "bg-primary"))
                .collect::<Vec<_>>()
        })
    });

    // 状态切换不刷新列表，直到下一次完整获取
    let handle_toggle = move |user_id: String| {
        let Some(token) = auth.session.with_untracked(|s| s.token().map(str::to_owned)) else {
            alert("No token found. Please log in.");
            return;
        };
        let api = api.get_value();
        spawn_local(async move {
            match api.toggle_user_status(&token, &user_id).await {
                Ok(_) => alert("User status updated successfully!"),
                Err(e) => {
                    log::error!("[Dashboard] error updating user status: {}", e);
                    alert("Error updating user status");
                }
            }
        });
    };

    let handle_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some((user_id, patch)) = edit_form.to_patch() else {
            return;
        };
        if patch.is_empty() {
            edit_form.reset();
            return;
        }
        let Some(token) = auth.session.with_untracked(|s| s.token().map(str::to_owned)) else {
            alert("No token found. Please log in.");
            return;
        };
        let api = api.get_value();
        spawn_local(async move {
            match api.update_user(&token, &user_id, &patch).await {
                Ok(user) => {
                    alert(&format!("User {} updated successfully!", user.username));
                    edit_form.reset();
                    set_refresh.update(|n| *n += 1);
                }
                Err(e) => {
                    log::error!("[Dashboard] error updating user: {}", e);
                    alert(&format!("Error updating user: {}", e));
                }
            }
        });
    };

    let go_prev = move |_| {
        set_pagination.update(|p| {
            if p.has_prev() {
                p.page -= 1;
            }
        })
    };
    let go_next = move |_| {
        set_pagination.update(|p| {
            if p.has_next() {
                p.page += 1;
            }
        })
    };

    let user_header = move |column: UserColumn| {
        view! {
            <th>
                <button class="btn btn-ghost btn-xs" on:click=move |_| set_sort.update(|s| s.toggle(column))>
                    {column.label()} " " {move || sort.with(|s| s.indicator(column))}
                </button>
            </th>
        }
    };
    let mock_header = move |column: MockColumn| {
        view! {
            <th>
                <button class="btn btn-ghost btn-xs" on:click=move |_| set_mock_sort.update(|s| s.toggle(column))>
                    {column.label()} " " {move || mock_sort.with(|s| s.indicator(column))}
                </button>
            </th>
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <h1 class="text-3xl font-bold text-center">"Admin Dashboard"</h1>

                <Show when=move || status.with(|s| s.error().is_some())>
                    <div role="alert" class="alert alert-error">
                        <span>{move || status.with(|s| s.error().unwrap_or_default().to_string())}</span>
                    </div>
                </Show>

                <Show
                    when=move || !status.with(LoadState::<()>::is_loading)
                    fallback=|| view! {
                        <div class="flex justify-center py-16">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                >
                    <BarChart title="User Activity Bar Chart" bars=activity />

                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h3 class="card-title">"Registered Users"</h3>
                            <input
                                type="text"
                                class="input input-bordered w-full"
                                placeholder="Search by username or email..."
                                prop:value=search
                                on:input=move |ev| set_search.set(event_target_value(&ev))
                            />

                            <Show when=move || edit_form.is_open()>
                                <form class="flex flex-wrap gap-2 items-end bg-base-200 rounded-box p-4" on:submit=handle_save>
                                    <input
                                        type="text"
                                        class="input input-bordered input-sm"
                                        placeholder="Username"
                                        prop:value=move || edit_form.username.get()
                                        on:input=move |ev| edit_form.username.set(event_target_value(&ev))
                                    />
                                    <input
                                        type="email"
                                        class="input input-bordered input-sm"
                                        placeholder="Email"
                                        prop:value=move || edit_form.email.get()
                                        on:input=move |ev| edit_form.email.set(event_target_value(&ev))
                                    />
                                    <select
                                        class="select select-bordered select-sm"
                                        prop:value=move || edit_form.role.get()
                                        on:change=move |ev| edit_form.role.set(event_target_value(&ev))
                                    >
                                        <option value="user">"user"</option>
                                        <option value="admin">"admin"</option>
                                    </select>
                                    <button type="submit" class="btn btn-primary btn-sm">"Save"</button>
                                    <button type="button" class="btn btn-ghost btn-sm" on:click=move |_| edit_form.reset()>
                                        "Cancel"
                                    </button>
                                </form>
                            </Show>

                            <div class="overflow-x-auto w-full">
                                <table class="table table-zebra w-full">
                                    <thead>
                                        <tr>
                                            {user_header(UserColumn::Username)}
                                            {user_header(UserColumn::Email)}
                                            <th>"Active Status"</th>
                                            <th>"Action"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        <For
                                            each=move || shown_users.get()
                                            key=row_key
                                            children=move |user: User| {
                                                let id = user.id.clone();
                                                let row = user.clone();
                                                view! {
                                                    <tr>
                                                        <td>{user.username}</td>
                                                        <td>{user.email}</td>
                                                        <td>
                                                            <span class=if user.active { "badge badge-success" } else { "badge badge-error" }>
                                                                {if user.active { "Active" } else { "Inactive" }}
                                                            </span>
                                                        </td>
                                                        <td class="flex gap-2">
                                                            <button
                                                                class="btn btn-error btn-sm"
                                                                on:click=move |_| handle_toggle(id.clone())
                                                            >
                                                                "Toggle Status"
                                                            </button>
                                                            <button
                                                                class="btn btn-outline btn-sm"
                                                                on:click=move |_| edit_form.load(&row)
                                                            >
                                                                "Edit"
                                                            </button>
                                                        </td>
                                                    </tr>
                                                }
                                            }
                                        />
                                    </tbody>
                                </table>
                            </div>
                        </div>
                    </div>

                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h3 class="card-title">"Mock Users List"</h3>
                            <div class="overflow-x-auto w-full">
                                <table class="table table-zebra w-full">
                                    <thead>
                                        <tr>
                                            {mock_header(MockColumn::Name)}
                                            {mock_header(MockColumn::Email)}
                                            <th>"Address"</th>
                                            <th>"Phone"</th>
                                            <th>"Website"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        <For
                                            each=shown_mock_users
                                            key=|u| u.id
                                            children=move |user: MockExternalUser| {
                                                view! {
                                                    <tr>
                                                        <td>{user.name}</td>
                                                        <td>{user.email}</td>
                                                        <td>{format!("{}, {}", user.address.city, user.address.street)}</td>
                                                        <td>{user.phone}</td>
                                                        <td>{user.website}</td>
                                                    </tr>
                                                }
                                            }
                                        />
                                    </tbody>
                                </table>
                            </div>
                        </div>
                    </div>

                    <div class="flex justify-center">
                        <div class="join">
                            <button class="join-item btn" disabled=move || !pagination.get().has_prev() on:click=go_prev>
                                "Previous"
                            </button>
                            <span class="join-item btn btn-disabled">
                                {move || {
                                    let p = pagination.get();
                                    format!("{} of {}", p.page, p.total_pages())
                                }}
                            </span>
                            <button class="join-item btn" disabled=move || !pagination.get().has_next() on:click=go_next>
                                "Next"
                            </button>
                        </div>
                    </div>
                </Show>
            </div>
        </div>
    }
}
