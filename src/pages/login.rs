//! Login page: sign-in form, forgot-password sub-form, and the local
//! development bypass.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::net::backend::{AuthError, Profile};
use crate::net::session_sync::SessionSync;
use crate::state::toasts::ToastKind;
use crate::util::validate;

#[component]
pub fn LoginPage() -> impl IntoView {
    let sync = expect_context::<SessionSync>();
    let state = sync.state;
    let navigate = use_navigate();

    // Already signed in: go straight to the profile.
    Effect::new({
        let navigate = navigate.clone();
        move || {
            let s = state.get();
            if !s.loading && s.profile.is_some() {
                navigate("/profile", NavigateOptions::default());
            }
        }
    });

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let forgot = RwSignal::new(false);
    let reset_sent = RwSignal::new(false);

    let on_login = {
        let sync = sync.clone();
        let navigate = navigate.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            error.set(None);

            let email_value = email.get_untracked();
            let password_value = password.get_untracked();
            if let Err(err) =
                validate::email(&email_value).and_then(|()| validate::password(&password_value))
            {
                error.set(Some(err.to_string()));
                return;
            }

            busy.set(true);
            let sync = sync.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match sync.sign_in(&email_value, &password_value).await {
                    Ok(()) => {
                        sync.toasts.update(|t| {
                            t.push(ToastKind::Success, "Inicio de sesión exitoso");
                        });
                        navigate("/profile", NavigateOptions::default());
                    }
                    Err(AuthError::InvalidCredentials) => error.set(Some(
                        "Correo electrónico o contraseña incorrectos.".to_owned(),
                    )),
                    Err(AuthError::Validation(message)) => error.set(Some(message)),
                    Err(_) => error.set(Some(
                        "Error al iniciar sesión. Intenta de nuevo.".to_owned(),
                    )),
                }
                busy.set(false);
            });
        }
    };

    let on_forgot = {
        let sync = sync.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            error.set(None);

            let email_value = email.get_untracked();
            if let Err(err) = validate::email(&email_value) {
                error.set(Some(err.to_string()));
                return;
            }

            busy.set(true);
            let sync = sync.clone();
            leptos::task::spawn_local(async move {
                match sync.reset_password(&email_value).await {
                    Ok(()) => reset_sent.set(true),
                    Err(_) => error.set(Some(
                        "Error al enviar las instrucciones. Intenta de nuevo.".to_owned(),
                    )),
                }
                busy.set(false);
            });
        }
    };

    let on_dev_mode = {
        let sync = sync.clone();
        let navigate = navigate.clone();
        move |_| {
            sync.set_mock_profile(Profile {
                id: "dev123".to_owned(),
                username: "DevUser".to_owned(),
                email: "dev@vincere.com".to_owned(),
                name_color: Some("#FF5733".to_owned()),
                avatar_url: Some("https://via.placeholder.com/150".to_owned()),
                created_at: String::new(),
            });
            navigate("/profile", NavigateOptions::default());
        }
    };

    view! {
        <Title text="Vincere Colors - Iniciar Sesión"/>
        <div class="auth-page">
            <div class="auth-card">
                <div class="auth-card__header">
                    <h1>
                        {move || if forgot.get() { "Restablecer Contraseña" } else { "Ave, Legionario" }}
                    </h1>
                    <p>
                        {move || {
                            if forgot.get() {
                                "Ingresa tu correo para recibir instrucciones"
                            } else {
                                "Inicia sesión en tu cuenta de Vincere"
                            }
                        }}
                    </p>
                </div>

                <Show when=move || error.get().is_some()>
                    <div class="auth-card__error">{move || error.get().unwrap_or_default()}</div>
                </Show>

                <Show when=move || reset_sent.get()>
                    <div class="auth-card__notice">
                        "Se han enviado las instrucciones para restablecer la contraseña a tu correo."
                    </div>
                </Show>

                <Show when=move || forgot.get()>
                    <form class="auth-form" on:submit=on_forgot.clone()>
                        <label class="field">
                            "Correo Electrónico"
                            <input
                                class="field__input"
                                type="email"
                                placeholder="Ingresa tu correo"
                                prop:value=move || email.get()
                                on:input=move |ev| email.set(event_target_value(&ev))
                            />
                        </label>
                        <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                            "Enviar Instrucciones"
                        </button>
                        <button class="btn btn--link" type="button" on:click=move |_| forgot.set(false)>
                            "Volver a Iniciar Sesión"
                        </button>
                    </form>
                </Show>

                <Show when=move || !forgot.get()>
                    <form class="auth-form" on:submit=on_login.clone()>
                        <label class="field">
                            "Correo Electrónico"
                            <input
                                class="field__input"
                                type="email"
                                placeholder="Ingresa tu correo"
                                prop:value=move || email.get()
                                on:input=move |ev| email.set(event_target_value(&ev))
                            />
                        </label>
                        <label class="field">
                            "Contraseña"
                            <input
                                class="field__input"
                                type="password"
                                placeholder="Ingresa tu contraseña"
                                prop:value=move || password.get()
                                on:input=move |ev| password.set(event_target_value(&ev))
                            />
                        </label>
                        <button class="btn btn--link" type="button" on:click=move |_| forgot.set(true)>
                            "¿Olvidaste tu contraseña?"
                        </button>
                        <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                            "Iniciar Sesión"
                        </button>
                        <button class="btn btn--outline" type="button" on:click=on_dev_mode.clone()>
                            "Modo Dev"
                        </button>
                        <p class="auth-card__footer">
                            "¿No tienes una cuenta? " <A href="/register">"Regístrate"</A>
                        </p>
                    </form>
                </Show>
            </div>
        </div>
    }
}
