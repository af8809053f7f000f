//! Account creation page.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::net::backend::AuthError;
use crate::net::session_sync::SessionSync;
use crate::util::validate;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let sync = expect_context::<SessionSync>();
    let state = sync.state;
    let navigate = use_navigate();

    Effect::new({
        let navigate = navigate.clone();
        move || {
            let s = state.get();
            if !s.loading && s.profile.is_some() {
                navigate("/profile", NavigateOptions::default());
            }
        }
    });

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_register = {
        let sync = sync.clone();
        let navigate = navigate.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            error.set(None);

            let username_value = username.get_untracked();
            let email_value = email.get_untracked();
            let password_value = password.get_untracked();
            let confirm_value = confirm_password.get_untracked();

            if let Err(err) = validate::username(&username_value)
                .and_then(|()| validate::email(&email_value))
                .and_then(|()| validate::password_pair(&password_value, &confirm_value))
            {
                error.set(Some(err.to_string()));
                return;
            }

            busy.set(true);
            let sync = sync.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match sync
                    .sign_up(&email_value, &password_value, &username_value)
                    .await
                {
                    Ok(()) => navigate("/profile", NavigateOptions::default()),
                    Err(AuthError::EmailTaken) => error.set(Some(
                        "Este correo ya está registrado. Por favor, inicia sesión o usa un correo diferente."
                            .to_owned(),
                    )),
                    Err(AuthError::UsernameTaken) => {
                        error.set(Some("El nombre de usuario ya está en uso.".to_owned()));
                    }
                    Err(AuthError::Validation(message)) => error.set(Some(message)),
                    Err(err) => error.set(Some(err.to_string())),
                }
                busy.set(false);
            });
        }
    };

    view! {
        <Title text="Vincere Colors - Crear Cuenta"/>
        <div class="auth-page auth-page--dark">
            <div class="auth-card">
                <div class="auth-card__header">
                    <h1>"Crear Cuenta"</h1>
                    <p>"Únete a la comunidad de Vincere"</p>
                </div>

                <Show when=move || error.get().is_some()>
                    <div class="auth-card__error">{move || error.get().unwrap_or_default()}</div>
                </Show>

                <form class="auth-form" on:submit=on_register>
                    <label class="field">
                        "Nombre de Usuario"
                        <input
                            class="field__input"
                            type="text"
                            placeholder="Elige un nombre de usuario"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="field">
                        "Correo Electrónico"
                        <input
                            class="field__input"
                            type="email"
                            placeholder="Ingresa tu correo electrónico"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="field">
                        "Contraseña"
                        <input
                            class="field__input"
                            type="password"
                            placeholder="Crea una contraseña"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="field">
                        "Confirmar Contraseña"
                        <input
                            class="field__input"
                            type="password"
                            placeholder="Confirma tu contraseña"
                            prop:value=move || confirm_password.get()
                            on:input=move |ev| confirm_password.set(event_target_value(&ev))
                        />
                    </label>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        "Crear Cuenta"
                    </button>
                    <p class="auth-card__footer">
                        "¿Ya tienes una cuenta? " <A href="/login">"Inicia Sesión"</A>
                    </p>
                </form>
            </div>
        </div>
    }
}
