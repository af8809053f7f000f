//! Site navigation bar with the session-aware account corner.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::backend::DEFAULT_NAME_COLOR;
use crate::net::session_sync::SessionSync;

/// Top navigation. The account corner renders nothing while the initial
/// session restore is loading, the profile link once a profile is
/// present, and a sign-in link otherwise.
#[component]
pub fn Navbar() -> impl IntoView {
    let sync = expect_context::<SessionSync>();
    let state = sync.state;

    view! {
        <header class="navbar">
            <A href="/" attr:class="navbar__brand">
                "Vincere " <span class="navbar__brand-accent">"Colors"</span>
            </A>

            <nav class="navbar__links">
                <A href="/" attr:class="navbar__link">"Inicio"</A>
                <A href="/game" attr:class="navbar__link">"El Juego"</A>
                <A href="/store" attr:class="navbar__link">"Tienda"</A>
                <A href="/wiki" attr:class="navbar__link">"Wiki"</A>
            </nav>

            <div class="navbar__account">
                {move || {
                    let s = state.get();
                    if s.loading {
                        ().into_any()
                    } else if let Some(profile) = s.profile {
                        let color = profile
                            .name_color
                            .clone()
                            .unwrap_or_else(|| DEFAULT_NAME_COLOR.to_owned());
                        view! {
                            <A href="/profile" attr:class="navbar__profile">
                                <span style:color=color>{profile.username.clone()}</span>
                            </A>
                        }
                            .into_any()
                    } else {
                        view! {
                            <A href="/login" attr:class="navbar__login">"Iniciar Sesión"</A>
                        }
                            .into_any()
                    }
                }}
            </div>
        </header>
    }
}
