//! Root application component with routing and context providers.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::footer::Footer;
use crate::components::navbar::Navbar;
use crate::components::toaster::Toaster;
use crate::config::SupabaseConfig;
use crate::net::backend::BackendHandle;
use crate::net::session_sync::SessionSync;
use crate::net::supabase::SupabaseBackend;
use crate::pages::game::GamePage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::profile::ProfilePage;
use crate::pages::register::RegisterPage;
use crate::pages::reset_password::ResetPasswordPage;
use crate::pages::store::StorePage;
use crate::pages::wiki::WikiPage;
use crate::pages::wiki_create::WikiCreatePage;

/// Root application component.
///
/// Builds the backend, starts session synchronization, and provides the
/// shared contexts every page expects.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let backend: Rc<dyn crate::net::backend::AuthBackend> =
        Rc::new(SupabaseBackend::new(SupabaseConfig::from_build_env()));
    let sync = SessionSync::new(Rc::clone(&backend));

    provide_context(sync.clone());
    provide_context(sync.toasts);
    provide_context(BackendHandle::new(backend));

    // Session change events flow for the lifetime of the app; the
    // subscription is dropped with the root component.
    let subscription = send_wrapper::SendWrapper::new(sync.subscribe());
    on_cleanup(move || drop(subscription));
    {
        let sync = sync.clone();
        leptos::task::spawn_local(async move {
            sync.init().await;
        });
    }

    view! {
        <Stylesheet id="site" href="/styles/site.css"/>
        <Title text="Vincere Colors"/>

        <Router>
            <Navbar/>
            <main class="site-main">
                <Routes fallback=HomePage>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("game") view=GamePage/>
                    <Route path=StaticSegment("store") view=StorePage/>
                    <Route path=StaticSegment("wiki") view=WikiPage/>
                    <Route
                        path=(StaticSegment("wiki"), StaticSegment("create"))
                        view=WikiCreatePage
                    />
                    <Route path=StaticSegment("profile") view=ProfilePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route
                        path=StaticSegment("reset-password")
                        view=ResetPasswordPage
                    />
                </Routes>
            </main>
            <Footer/>
            <Toaster/>
        </Router>
    }
}
