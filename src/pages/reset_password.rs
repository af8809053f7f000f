//! Recovery page served at the fixed `/reset-password` path the recovery
//! mail links back to. The backend client adopts the recovery session from
//! the URL fragment during initialization; this page only sets the new
//! password.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::backend::AuthError;
use crate::net::session_sync::SessionSync;
use crate::util::validate;

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let sync = expect_context::<SessionSync>();
    let navigate = use_navigate();

    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let success = RwSignal::new(false);
    let busy = RwSignal::new(false);

    let on_submit = {
        let sync = sync.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            error.set(None);

            let password_value = password.get_untracked();
            let confirm_value = confirm_password.get_untracked();
            if let Err(err) = validate::password_pair(&password_value, &confirm_value) {
                error.set(Some(err.to_string()));
                return;
            }

            busy.set(true);
            let sync = sync.clone();
            leptos::task::spawn_local(async move {
                match sync.change_password(&password_value).await {
                    Ok(()) => success.set(true),
                    Err(AuthError::NotAuthenticated) => error.set(Some(
                        "El enlace de recuperación no es válido o ha expirado.".to_owned(),
                    )),
                    Err(_) => error.set(Some(
                        "Ha ocurrido un error inesperado. Inténtalo de nuevo.".to_owned(),
                    )),
                }
                busy.set(false);
            });
        }
    };

    view! {
        <Title text="Vincere Colors - Restablecer Contraseña"/>
        <div class="auth-page">
            <div class="auth-card">
                <div class="auth-card__header">
                    <h1>"Restablecer Contraseña"</h1>
                    <p>"Crea una nueva contraseña para tu cuenta"</p>
                </div>

                <Show when=move || error.get().is_some()>
                    <div class="auth-card__error">{move || error.get().unwrap_or_default()}</div>
                </Show>

                <Show
                    when=move || success.get()
                    fallback={
                        let on_submit = on_submit.clone();
                        move || {
                            view! {
                                <form class="auth-form" on:submit=on_submit.clone()>
                                    <label class="field">
                                        "Nueva Contraseña"
                                        <input
                                            class="field__input"
                                            type="password"
                                            placeholder="Ingresa tu nueva contraseña"
                                            prop:value=move || password.get()
                                            on:input=move |ev| password.set(event_target_value(&ev))
                                        />
                                    </label>
                                    <label class="field">
                                        "Confirmar Nueva Contraseña"
                                        <input
                                            class="field__input"
                                            type="password"
                                            placeholder="Confirma tu nueva contraseña"
                                            prop:value=move || confirm_password.get()
                                            on:input=move |ev| confirm_password.set(event_target_value(&ev))
                                        />
                                    </label>
                                    <button
                                        class="btn btn--primary"
                                        type="submit"
                                        disabled=move || busy.get()
                                    >
                                        "Restablecer Contraseña"
                                    </button>
                                </form>
                            }
                        }
                    }
                >
                    <div class="auth-card__success">
                        <h2>"Contraseña restablecida"</h2>
                        <p>"Tu contraseña se ha restablecido correctamente."</p>
                        <button
                            class="btn btn--primary"
                            on:click={
                                let navigate = navigate.clone();
                                move |_| navigate("/login", NavigateOptions::default())
                            }
                        >
                            "Ir a Iniciar Sesión"
                        </button>
                    </div>
                </Show>
            </div>
        </div>
    }
}
