//! Static site footer.

use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer">
            <div class="footer__columns">
                <div class="footer__column">
                    <h3>"Vincere Colors"</h3>
                    <p>"Estrategia en tiempo real inspirada en la Roma clásica."</p>
                </div>
                <div class="footer__column">
                    <h3>"Explorar"</h3>
                    <A href="/game">"El Juego"</A>
                    <A href="/store">"Tienda"</A>
                    <A href="/wiki">"Wiki"</A>
                </div>
                <div class="footer__column">
                    <h3>"Cuenta"</h3>
                    <A href="/login">"Iniciar Sesión"</A>
                    <A href="/register">"Crear Cuenta"</A>
                </div>
            </div>
            <p class="footer__legal">"© 2025 Vincere Games. Todos los derechos reservados."</p>
        </footer>
    }
}
