//! Storefront: static catalog with category filtering. Checkout is not
//! wired to any payment flow; the buy button only raises a toast.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

use crate::net::session_sync::SessionSync;
use crate::state::toasts::ToastKind;

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Chest,
    Currency,
    Special,
}

impl ItemKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Chest => "Cofres",
            Self::Currency => "Monedas",
            Self::Special => "Ofertas Especiales",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StoreItem {
    pub name: &'static str,
    pub description: &'static str,
    /// Price in euro cents so the catalog stays `Eq`-friendly.
    pub price_cents: u32,
    pub image: &'static str,
    pub kind: ItemKind,
    pub highlight: bool,
}

impl StoreItem {
    pub fn price_label(&self) -> String {
        format!("€{}.{:02}", self.price_cents / 100, self.price_cents % 100)
    }
}

pub const CATALOG: &[StoreItem] = &[
    StoreItem {
        name: "Cofre de Bronce",
        description: "Contiene objetos comunes y una pequeña cantidad de Donarium.",
        price_cents: 499,
        image: "https://vinceregames-441081885.imgix.net/CogreBrnoce.jpg",
        kind: ItemKind::Chest,
        highlight: false,
    },
    StoreItem {
        name: "Cofre de Plata",
        description: "Contiene objetos poco comunes y una cantidad moderada de Donarium.",
        price_cents: 999,
        image: "https://vinceregames-441081885.imgix.net/CofrePlata.jpg",
        kind: ItemKind::Chest,
        highlight: false,
    },
    StoreItem {
        name: "Cofre de Oro",
        description: "Contiene objetos raros y una gran cantidad de Donarium.",
        price_cents: 1999,
        image: "https://vinceregames-441081885.imgix.net/CofreOro.jpg",
        kind: ItemKind::Chest,
        highlight: true,
    },
    StoreItem {
        name: "100 Donarium",
        description: "Un pequeño paquete de monedas de Donarium para compras básicas.",
        price_cents: 499,
        image: "https://vinceregames-441081885.imgix.net/100Moneda.png",
        kind: ItemKind::Currency,
        highlight: false,
    },
    StoreItem {
        name: "500 Donarium",
        description: "Un paquete mediano de monedas de Donarium para jugadores regulares.",
        price_cents: 1999,
        image: "https://vinceregames-441081885.imgix.net/500Monedas.jpg",
        kind: ItemKind::Currency,
        highlight: false,
    },
    StoreItem {
        name: "1200 Donarium",
        description: "Un gran paquete de monedas de Donarium con cantidad adicional de bonificación.",
        price_cents: 3999,
        image: "https://vinceregames-441081885.imgix.net/1200Moneda.png",
        kind: ItemKind::Currency,
        highlight: true,
    },
    StoreItem {
        name: "Paquete de Inicio",
        description: "Perfecto para nuevos jugadores. Incluye un Cofre de Bronce y 200 Donarium.",
        price_cents: 999,
        image: "https://vinceregames-441081885.imgix.net/Cofre200.png",
        kind: ItemKind::Special,
        highlight: true,
    },
    StoreItem {
        name: "Paquete Premium",
        description: "Oferta exclusiva con Cofre de Oro y 800 Donarium a precio rebajado.",
        price_cents: 2999,
        image: "https://vinceregames-441081885.imgix.net/Cofre800.png",
        kind: ItemKind::Special,
        highlight: true,
    },
];

/// `None` means "all categories".
pub fn filter_items(kind: Option<ItemKind>) -> Vec<StoreItem> {
    CATALOG
        .iter()
        .copied()
        .filter(|item| kind.is_none_or(|k| item.kind == k))
        .collect()
}

#[component]
pub fn StorePage() -> impl IntoView {
    let sync = expect_context::<SessionSync>();
    let state = sync.state;
    let selected = RwSignal::new(None::<ItemKind>);

    let signed_in = move || state.get().profile.is_some();

    let toasts = sync.toasts;
    let on_buy = move |name: &'static str| {
        toasts.update(|t| {
            t.push(
                ToastKind::Info,
                &format!("Las compras no están disponibles por ahora. Artículo: {name}"),
            );
        });
    };

    let categories = [
        (None, "Todos los Artículos"),
        (Some(ItemKind::Chest), ItemKind::Chest.label()),
        (Some(ItemKind::Currency), ItemKind::Currency.label()),
        (Some(ItemKind::Special), ItemKind::Special.label()),
    ];

    view! {
        <Title text="Vincere Colors - Tienda"/>
        <div class="store-page">
            <header class="page-header">
                <h1 class="page-header__title">"Tienda de Vincere"</h1>
                <p class="page-header__subtitle">
                    "Mejora tu experiencia de juego con cofres, monedas y ofertas especiales."
                </p>
            </header>

            <Show when=move || !state.get().loading && !signed_in()>
                <div class="store-page__signin-hint">
                    <p>"Crea una cuenta o inicia sesión para comprar artículos"</p>
                    <div class="store-page__signin-actions">
                        <A href="/login" attr:class="btn btn--primary">
                            "Iniciar Sesión"
                        </A>
                        <A href="/register" attr:class="btn btn--outline">
                            "Registrarse"
                        </A>
                    </div>
                </div>
            </Show>

            <nav class="store-page__categories">
                {categories
                    .into_iter()
                    .map(|(kind, label)| {
                        view! {
                            <button
                                class=move || {
                                    if selected.get() == kind {
                                        "category-pill category-pill--active"
                                    } else {
                                        "category-pill"
                                    }
                                }
                                on:click=move |_| selected.set(kind)
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>

            <div class="store-grid">
                <For
                    each=move || filter_items(selected.get())
                    key=|item| item.name
                    children=move |item| {
                        view! {
                            <article class=if item.highlight {
                                "store-card store-card--highlight"
                            } else {
                                "store-card"
                            }>
                                <div class="store-card__media">
                                    <img src=item.image alt=item.name/>
                                    <Show when=move || item.highlight>
                                        <span class="store-card__badge">"Popular"</span>
                                    </Show>
                                </div>
                                <div class="store-card__body">
                                    <h3 class="store-card__name">{item.name}</h3>
                                    <p class="store-card__description">{item.description}</p>
                                    <div class="store-card__footer">
                                        <span class="store-card__price">
                                            {item.price_label()}
                                        </span>
                                        <button
                                            class="btn btn--primary btn--small"
                                            disabled=move || !signed_in()
                                            on:click=move |_| on_buy(item.name)
                                        >
                                            "Comprar"
                                        </button>
                                    </div>
                                </div>
                            </article>
                        }
                    }
                />
            </div>
        </div>
    }
}
