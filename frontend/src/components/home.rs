use leptos::prelude::*;

use crate::auth::use_auth;
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let greeting = move || {
        auth.session.with(|s| match s.identity() {
            Some(user) => format!("Welcome back, {}!", user.username),
            None => "Welcome to the Admin Console".to_string(),
        })
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-md">
                    <h1 class="text-4xl font-bold">{greeting}</h1>
                    <p class="py-6">"Manage users, review activity and keep an eye on your account."</p>
                    <Show
                        when=move || auth.session.with(|s| s.is_authenticated())
                        fallback=|| view! {
                            <Link to=AppRoute::Login class="btn btn-primary">"Get Started"</Link>
                        }
                    >
                        <Link to=AppRoute::Profile class="btn btn-primary">"Go to Profile"</Link>
                    </Show>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">"Page not found"</p>
                <Link to=AppRoute::Home class="btn btn-ghost mt-6">"Back home"</Link>
            </div>
        </div>
    }
}
