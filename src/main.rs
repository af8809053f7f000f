//! CSR entry point. Mounts the application to `<body>`; built for the
//! browser by trunk with the `csr` feature enabled. The non-`csr` build
//! exists only so the crate compiles for native test runs.

#[cfg(feature = "csr")]
fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(vincere_site::app::App);
}

#[cfg(not(feature = "csr"))]
fn main() {}
