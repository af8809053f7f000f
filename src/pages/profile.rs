//! Profile page: account data, avatar upload, password change, sign-out.
//! Redirects to `/login` when no profile is present.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::backend::{DEFAULT_NAME_COLOR, ProfileUpdate};
use crate::net::session_sync::SessionSync;
use crate::util::validate;

#[derive(Clone, Copy, PartialEq, Eq)]
enum ProfileTab {
    Account,
    Security,
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let sync = expect_context::<SessionSync>();
    let state = sync.state;
    let navigate = use_navigate();

    Effect::new({
        let navigate = navigate.clone();
        move || {
            let s = state.get();
            if !s.loading && s.profile.is_none() {
                navigate("/login", NavigateOptions::default());
            }
        }
    });

    let active_tab = RwSignal::new(ProfileTab::Account);

    // Form state, seeded once from the loaded profile.
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let name_color = RwSignal::new(DEFAULT_NAME_COLOR.to_owned());
    let form_seeded = RwSignal::new(false);
    Effect::new(move || {
        if form_seeded.get_untracked() {
            return;
        }
        if let Some(profile) = state.get().profile {
            username.set(profile.username);
            email.set(profile.email);
            name_color.set(
                profile
                    .name_color
                    .unwrap_or_else(|| DEFAULT_NAME_COLOR.to_owned()),
            );
            form_seeded.set(true);
        }
    });

    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_save = {
        let sync = sync.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            error.set(None);

            let username_value = username.get_untracked();
            let email_value = email.get_untracked();
            if let Err(err) = validate::username(&username_value)
                .and_then(|()| validate::email(&email_value))
            {
                error.set(Some(err.to_string()));
                return;
            }

            busy.set(true);
            let sync = sync.clone();
            leptos::task::spawn_local(async move {
                let update = ProfileUpdate {
                    username: Some(username_value),
                    email: Some(email_value),
                    name_color: Some(name_color.get_untracked()),
                    avatar_url: None,
                };
                if let Err(err) = sync.update_profile(update).await {
                    error.set(Some(err.to_string()));
                }
                busy.set(false);
            });
        }
    };

    let on_avatar_selected = {
        let sync = sync.clone();
        move |ev: leptos::ev::Event| {
            #[cfg(feature = "csr")]
            {
                use wasm_bindgen::JsCast;

                let Some(input) = ev
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                else {
                    return;
                };
                let Some(file) = input.files().and_then(|files| files.get(0)) else {
                    return;
                };

                let name = file.name();
                let sync = sync.clone();
                leptos::task::spawn_local(async move {
                    let Ok(buffer) =
                        wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await
                    else {
                        log::warn!("avatar read failed");
                        return;
                    };
                    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                    if let Ok(url) = sync.upload_avatar(&name, bytes).await {
                        let _ = sync
                            .update_profile(ProfileUpdate {
                                avatar_url: Some(url),
                                ..ProfileUpdate::default()
                            })
                            .await;
                    }
                });
            }
            #[cfg(not(feature = "csr"))]
            {
                let _ = (&ev, &sync);
            }
        }
    };

    // Security tab state.
    let new_password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let password_error = RwSignal::new(None::<String>);

    let on_change_password = {
        let sync = sync.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            password_error.set(None);

            let password_value = new_password.get_untracked();
            let confirm_value = confirm_password.get_untracked();
            if let Err(err) = validate::password_pair(&password_value, &confirm_value) {
                password_error.set(Some(err.to_string()));
                return;
            }

            let sync = sync.clone();
            leptos::task::spawn_local(async move {
                if sync.change_password(&password_value).await.is_ok() {
                    new_password.set(String::new());
                    confirm_password.set(String::new());
                }
            });
        }
    };

    let on_sign_out = {
        let sync = sync.clone();
        let navigate = navigate.clone();
        move |_| {
            let sync = sync.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                if sync.sign_out().await.is_ok() {
                    navigate("/login", NavigateOptions::default());
                }
            });
        }
    };

    let avatar_url = move || {
        state
            .get()
            .profile
            .and_then(|p| p.avatar_url)
            .unwrap_or_else(|| "https://via.placeholder.com/150".to_owned())
    };

    view! {
        <Title text="Vincere Colors - Tu Perfil"/>
        <div class="profile-page">
            <div class="profile-card">
                <aside class="profile-card__side">
                    <img class="profile-card__avatar" src=avatar_url alt="Avatar"/>
                    <span
                        class="profile-card__name"
                        style:color=move || name_color.get()
                    >
                        {move || username.get()}
                    </span>
                    <nav class="profile-card__tabs">
                        <button
                            class=move || tab_class(active_tab.get(), ProfileTab::Account)
                            on:click=move |_| active_tab.set(ProfileTab::Account)
                        >
                            "Perfil"
                        </button>
                        <button
                            class=move || tab_class(active_tab.get(), ProfileTab::Security)
                            on:click=move |_| active_tab.set(ProfileTab::Security)
                        >
                            "Seguridad"
                        </button>
                    </nav>
                    <button class="btn btn--outline" on:click=on_sign_out>
                        "Cerrar Sesión"
                    </button>
                </aside>

                <section class="profile-card__body">
                    <Show when=move || active_tab.get() == ProfileTab::Account>
                        <Show when=move || error.get().is_some()>
                            <div class="auth-card__error">
                                {move || error.get().unwrap_or_default()}
                            </div>
                        </Show>
                        <form class="auth-form" on:submit=on_save.clone()>
                            <label class="field">
                                "Nombre de Usuario"
                                <input
                                    class="field__input"
                                    type="text"
                                    prop:value=move || username.get()
                                    on:input=move |ev| username.set(event_target_value(&ev))
                                />
                            </label>
                            <label class="field">
                                "Correo Electrónico"
                                <input
                                    class="field__input"
                                    type="email"
                                    prop:value=move || email.get()
                                    on:input=move |ev| email.set(event_target_value(&ev))
                                />
                            </label>
                            <label class="field">
                                "Color de Nombre"
                                <input
                                    class="field__input field__input--color"
                                    type="color"
                                    prop:value=move || name_color.get()
                                    on:input=move |ev| name_color.set(event_target_value(&ev))
                                />
                            </label>
                            <label class="field">
                                "Avatar"
                                <input
                                    class="field__input"
                                    type="file"
                                    accept="image/*"
                                    on:change=on_avatar_selected.clone()
                                />
                            </label>
                            <button
                                class="btn btn--primary"
                                type="submit"
                                disabled=move || busy.get()
                            >
                                "Guardar Cambios"
                            </button>
                        </form>
                    </Show>

                    <Show when=move || active_tab.get() == ProfileTab::Security>
                        <Show when=move || password_error.get().is_some()>
                            <div class="auth-card__error">
                                {move || password_error.get().unwrap_or_default()}
                            </div>
                        </Show>
                        <form class="auth-form" on:submit=on_change_password.clone()>
                            <label class="field">
                                "Nueva Contraseña"
                                <input
                                    class="field__input"
                                    type="password"
                                    prop:value=move || new_password.get()
                                    on:input=move |ev| new_password.set(event_target_value(&ev))
                                />
                            </label>
                            <label class="field">
                                "Confirmar Contraseña"
                                <input
                                    class="field__input"
                                    type="password"
                                    prop:value=move || confirm_password.get()
                                    on:input=move |ev| {
                                        confirm_password.set(event_target_value(&ev));
                                    }
                                />
                            </label>
                            <button class="btn btn--primary" type="submit">
                                "Cambiar Contraseña"
                            </button>
                        </form>
                    </Show>
                </section>
            </div>
        </div>
    }
}

fn tab_class(active: ProfileTab, tab: ProfileTab) -> &'static str {
    if active == tab {
        "profile-card__tab profile-card__tab--active"
    } else {
        "profile-card__tab"
    }
}
