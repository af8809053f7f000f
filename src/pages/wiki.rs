//! Community wiki index: searchable, paginated article listing. The
//! create button only appears for signed-in users.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

use crate::net::session_sync::SessionSync;

#[cfg(test)]
#[path = "wiki_test.rs"]
mod wiki_test;

pub const ITEMS_PER_PAGE: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WikiEntry {
    pub title: &'static str,
    pub summary: &'static str,
    pub category: &'static str,
    pub author: &'static str,
    pub date: &'static str,
}

pub const CATEGORIES: &[(&str, &str)] = &[
    ("gameplay", "Mecánicas del Juego"),
    ("units", "Unidades y Personajes"),
    ("buildings", "Edificios y Estructuras"),
    ("resources", "Recursos y Economía"),
    ("history", "Contexto Histórico"),
    ("strategy", "Guías de Estrategia"),
];

pub const ENTRIES: &[WikiEntry] = &[
    WikiEntry {
        title: "Primeros pasos en Vincere Colors",
        summary: "Guía para principiantes sobre las mecánicas básicas del juego.",
        category: "gameplay",
        author: "GameMaster",
        date: "15/03/2025",
    },
    WikiEntry {
        title: "Guía de Unidades Militares",
        summary: "Información completa sobre unidades militares, sus fortalezas y usos estratégicos.",
        category: "units",
        author: "CommanderX",
        date: "12/03/2025",
    },
    WikiEntry {
        title: "Edificios esenciales para el crecimiento económico",
        summary: "Aprende qué edificios priorizar para una economía sólida al inicio del juego.",
        category: "buildings",
        author: "ArchitectPro",
        date: "10/03/2025",
    },
    WikiEntry {
        title: "Gestión de recursos 101",
        summary: "Consejos para recolectar y gestionar recursos de manera eficiente.",
        category: "resources",
        author: "ResourceGuru",
        date: "08/03/2025",
    },
    WikiEntry {
        title: "Influencia romana en el diseño del juego",
        summary: "Cómo la cultura romana y sus tácticas militares influyeron en el diseño del juego.",
        category: "history",
        author: "HistorianX",
        date: "05/03/2025",
    },
    WikiEntry {
        title: "Estrategias avanzadas de combate",
        summary: "Domina el campo de batalla con estas técnicas y formaciones avanzadas.",
        category: "strategy",
        author: "BattleMaster",
        date: "01/03/2025",
    },
];

/// Case-insensitive match against title and summary; empty term matches all.
pub fn filter_entries(term: &str) -> Vec<WikiEntry> {
    let needle = term.trim().to_lowercase();
    ENTRIES
        .iter()
        .copied()
        .filter(|e| {
            needle.is_empty()
                || e.title.to_lowercase().contains(&needle)
                || e.summary.to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn page_count(total: usize) -> usize {
    total.div_ceil(ITEMS_PER_PAGE)
}

/// One-based page slice of the filtered listing.
pub fn page_items(entries: &[WikiEntry], page: usize) -> Vec<WikiEntry> {
    let start = page.saturating_sub(1) * ITEMS_PER_PAGE;
    entries
        .iter()
        .skip(start)
        .take(ITEMS_PER_PAGE)
        .copied()
        .collect()
}

pub fn category_label(id: &str) -> &'static str {
    CATEGORIES
        .iter()
        .find(|(cat_id, _)| *cat_id == id)
        .map_or("General", |(_, label)| label)
}

#[component]
pub fn WikiPage() -> impl IntoView {
    let sync = expect_context::<SessionSync>();
    let state = sync.state;

    let search = RwSignal::new(String::new());
    let page = RwSignal::new(1_usize);

    let filtered = Memo::new(move |_| filter_entries(&search.get()));
    let total_pages = move || page_count(filtered.get().len());
    let multiple_pages = move || total_pages() > 1;

    let signed_in = move || state.get().profile.is_some();

    view! {
        <Title text="Vincere Colors - Wiki"/>
        <div class="wiki-page">
            <header class="page-header">
                <h1 class="page-header__title">"Vincere Wiki"</h1>
                <p class="page-header__subtitle">
                    "Tu guía completa para todo lo relacionado con Vincere Colors"
                </p>
                <input
                    class="wiki-page__search"
                    type="text"
                    placeholder="Busca artículos en la wiki..."
                    prop:value=move || search.get()
                    on:input=move |ev| {
                        search.set(event_target_value(&ev));
                        page.set(1);
                    }
                />
                <Show when=signed_in>
                    <A href="/wiki/create" attr:class="btn btn--primary">
                        "Crear Artículo"
                    </A>
                </Show>
            </header>

            <aside class="wiki-page__categories">
                <h2>"Categorías"</h2>
                <ul>
                    {CATEGORIES
                        .iter()
                        .map(|(_, label)| view! { <li>{*label}</li> })
                        .collect_view()}
                </ul>
            </aside>

            <section class="wiki-list">
                <For
                    each=move || page_items(&filtered.get(), page.get())
                    key=|entry| entry.title
                    children=|entry| {
                        view! {
                            <article class="wiki-card">
                                <span class="wiki-card__category">
                                    {category_label(entry.category)}
                                </span>
                                <h3 class="wiki-card__title">{entry.title}</h3>
                                <p class="wiki-card__summary">{entry.summary}</p>
                                <footer class="wiki-card__meta">
                                    <span>{entry.author}</span>
                                    <span>{entry.date}</span>
                                </footer>
                            </article>
                        }
                    }
                />
                <Show when=move || filtered.get().is_empty()>
                    <p class="wiki-list__empty">
                        "No se encontraron artículos para tu búsqueda."
                    </p>
                </Show>
            </section>

            <Show when=multiple_pages>
                <nav class="wiki-page__pagination">
                    {move || {
                        (1..=total_pages())
                            .map(|n| {
                                view! {
                                    <button
                                        class=move || {
                                            if page.get() == n {
                                                "page-pill page-pill--active"
                                            } else {
                                                "page-pill"
                                            }
                                        }
                                        on:click=move |_| page.set(n)
                                    >
                                        {n}
                                    </button>
                                }
                            })
                            .collect_view()
                    }}
                </nav>
            </Show>
        </div>
    }
}
