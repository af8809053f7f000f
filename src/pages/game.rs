//! Game info page: mechanics overview and mode descriptions.

use leptos::prelude::*;
use leptos_meta::Title;

#[component]
pub fn GamePage() -> impl IntoView {
    view! {
        <Title text="Vincere Colors - El Juego"/>
        <div class="game-page">
            <header class="page-header">
                <h1 class="page-header__title">"El Juego"</h1>
                <p class="page-header__subtitle">
                    "Vincere Colors es un juego de acción por equipos donde pintar \
                     el escenario es tan importante como vencer al rival."
                </p>
            </header>

            <section class="game-section">
                <h2>"Mecánicas"</h2>
                <p>
                    "Cada personaje dispone de un arsenal cromático propio: ataques \
                     que dejan rastro de color, habilidades que limpian el terreno \
                     enemigo y definitivas que transforman zonas enteras del mapa. \
                     Al final de cada ronda gana el equipo que controle más \
                     superficie pintada."
                </p>
            </section>

            <section class="game-section">
                <h2>"Modos de Juego"</h2>
                <ul class="game-modes">
                    <li>
                        <strong>"Conquista"</strong>
                        " — 4 contra 4, tres minutos, gana quien más pinta."
                    </li>
                    <li>
                        <strong>"Duelo"</strong>
                        " — 1 contra 1 en mapas reducidos, ideal para practicar."
                    </li>
                    <li>
                        <strong>"Lienzo Libre"</strong>
                        " — sin rivales ni tiempo, explora y pinta a tu ritmo."
                    </li>
                </ul>
            </section>

            <section class="game-section">
                <h2>"Requisitos"</h2>
                <p>
                    "Disponible para PC. Se recomienda una GPU con soporte para \
                     DirectX 11 o superior y 8 GB de memoria."
                </p>
            </section>
        </div>
    }
}
