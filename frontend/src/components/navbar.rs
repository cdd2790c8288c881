use leptos::prelude::*;

use crate::auth::{logout, use_auth};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let is_authenticated = Memo::new(move |_| auth.session.with(|s| s.is_authenticated()));
    let is_admin = Memo::new(move |_| auth.session.with(|s| s.is_admin()));

    let on_logout = move |_| {
        logout(&auth);
        router.navigate(AppRoute::Login.to_path());
    };

    view! {
        <div class="navbar bg-base-100 shadow-sm px-4">
            <div class="flex-1">
                <Link to=AppRoute::Home class="btn btn-ghost text-xl">"Admin Console"</Link>
            </div>
            <div class="flex-none">
                <ul class="menu menu-horizontal px-1 gap-1">
                    {move || {
                        if is_authenticated.get() {
                            view! {
                                <Show when=move || is_admin.get()>
                                    <li><Link to=AppRoute::Dashboard>"Dashboard"</Link></li>
                                </Show>
                                <li><Link to=AppRoute::Profile>"Profile"</Link></li>
                                <li><Link to=AppRoute::Report>"Report"</Link></li>
                                <li><button on:click=on_logout>"Logout"</button></li>
                            }
                            .into_any()
                        } else {
                            view! {
                                <li><Link to=AppRoute::Login>"Login"</Link></li>
                                <li><Link to=AppRoute::Register>"Register"</Link></li>
                            }
                            .into_any()
                        }
                    }}
                </ul>
            </div>
        </div>
    }
}
