//! Landing page: hero banner plus feature highlights.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Title text="Vincere Colors"/>
        <div class="home-page">
            <section class="hero">
                <h1 class="hero__title">"Vincere Colors"</h1>
                <p class="hero__tagline">
                    "Un mundo donde el color es poder. Lucha, pinta y conquista."
                </p>
                <div class="hero__actions">
                    <A href="/game" attr:class="btn btn--primary">
                        "Conoce el Juego"
                    </A>
                    <A href="/store" attr:class="btn btn--outline">
                        "Visita la Tienda"
                    </A>
                </div>
            </section>

            <section class="feature-grid">
                <article class="feature-card">
                    <h2 class="feature-card__title">"Combate con Color"</h2>
                    <p>
                        "Cada habilidad tiñe el campo de batalla. Controla más \
                         territorio que tu rival para dominar la partida."
                    </p>
                </article>
                <article class="feature-card">
                    <h2 class="feature-card__title">"Personaliza tu Héroe"</h2>
                    <p>
                        "Desbloquea paletas, trazos y estilos únicos para que tu \
                         personaje pinte a tu manera."
                    </p>
                </article>
                <article class="feature-card">
                    <h2 class="feature-card__title">"Comunidad Creativa"</h2>
                    <p>
                        "Comparte estrategias y guías en la wiki de la comunidad, \
                         escrita por y para jugadores."
                    </p>
                </article>
            </section>
        </div>
    }
}
