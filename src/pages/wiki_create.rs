//! Wiki article editor. Requires a signed-in session; the insert goes
//! straight to the backend rather than through the session layer.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::backend::{BackendHandle, NewWikiArticle};
use crate::net::session_sync::SessionSync;
use crate::pages::wiki::CATEGORIES;
use crate::state::toasts::ToastKind;

#[component]
pub fn WikiCreatePage() -> impl IntoView {
    let sync = expect_context::<SessionSync>();
    let backend = expect_context::<BackendHandle>();
    let state = sync.state;
    let toasts = sync.toasts;
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

    let title = RwSignal::new(String::new());
    let content = RwSignal::new(String::new());
    let category = RwSignal::new(CATEGORIES[0].0.to_owned());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let cancel_navigate = navigate.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        error.set(None);

        let title_value = title.get_untracked().trim().to_owned();
        let content_value = content.get_untracked().trim().to_owned();
        if title_value.is_empty() || content_value.is_empty() {
            error.set(Some("El título y el contenido son obligatorios.".to_owned()));
            return;
        }
        let Some(author_id) = state.with_untracked(|s| s.identity()) else {
            error.set(Some("Debes iniciar sesión para publicar.".to_owned()));
            return;
        };

        busy.set(true);
        let backend = backend.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let article = NewWikiArticle {
                title: title_value,
                content: content_value,
                category: category.get_untracked(),
                author_id,
            };
            match backend.create_wiki_article(&article).await {
                Ok(_) => {
                    toasts.update(|t| {
                        t.push(ToastKind::Success, "¡Artículo creado exitosamente!");
                    });
                    navigate("/wiki", NavigateOptions::default());
                }
                Err(err) => {
                    log::warn!("wiki insert failed: {err}");
                    error.set(Some("Error al crear el artículo.".to_owned()));
                }
            }
            busy.set(false);
        });
    };

    view! {
        <Title text="Vincere Colors - Crear Artículo Wiki"/>
        <div class="wiki-create-page">
            <div class="auth-card auth-card--wide">
                <h1 class="auth-card__title">"Crear Artículo"</h1>
                <Show when=move || error.get().is_some()>
                    <div class="auth-card__error">
                        {move || error.get().unwrap_or_default()}
                    </div>
                </Show>
                <form class="auth-form" on:submit=on_submit>
                    <label class="field">
                        "Título"
                        <input
                            class="field__input"
                            type="text"
                            prop:value=move || title.get()
                            on:input=move |ev| title.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="field">
                        "Categoría"
                        <select
                            class="field__input"
                            on:change=move |ev| category.set(event_target_value(&ev))
                        >
                            {CATEGORIES
                                .iter()
                                .map(|(id, label)| {
                                    view! { <option value=*id>{*label}</option> }
                                })
                                .collect_view()}
                        </select>
                    </label>
                    <label class="field">
                        "Contenido"
                        <textarea
                            class="field__input field__input--textarea"
                            rows="12"
                            prop:value=move || content.get()
                            on:input=move |ev| content.set(event_target_value(&ev))
                        ></textarea>
                    </label>
                    <div class="wiki-create-page__actions">
                        <button
                            class="btn btn--outline"
                            type="button"
                            on:click=move |_| {
                                cancel_navigate("/wiki", NavigateOptions::default());
                            }
                        >
                            "Cancelar"
                        </button>
                        <button
                            class="btn btn--primary"
                            type="submit"
                            disabled=move || busy.get()
                        >
                            "Publicar Artículo"
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
