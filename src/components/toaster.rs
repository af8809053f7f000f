//! Transient notification overlay.
//!
//! Renders the toast queue from context. Each toast arms a one-shot timer
//! that dismisses it after a few seconds; the close button dismisses it
//! early. Timers only exist in the browser build.

use leptos::prelude::*;

use crate::state::toasts::{Toast, ToastKind, ToastsState};

#[cfg(feature = "csr")]
const TOAST_LIFETIME_MS: u64 = 4_000;

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastsState>>();

    view! {
        <div class="toaster">
            <For
                each=move || toasts.get().toasts
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;

                    #[cfg(feature = "csr")]
                    leptos::task::spawn_local(async move {
                        gloo_timers::future::sleep(std::time::Duration::from_millis(
                            TOAST_LIFETIME_MS,
                        ))
                        .await;
                        toasts.update(|t| t.dismiss(id));
                    });

                    let kind_class = match toast.kind {
                        ToastKind::Success => "toast toast--success",
                        ToastKind::Error => "toast toast--error",
                        ToastKind::Info => "toast toast--info",
                    };

                    view! {
                        <div class=kind_class>
                            <span class="toast__message">{toast.message.clone()}</span>
                            <button
                                class="toast__close"
                                on:click=move |_| toasts.update(|t| t.dismiss(id))
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
