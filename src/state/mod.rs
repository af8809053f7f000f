//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State structs are plain data provided via `RwSignal<_>` contexts from
//! the application root. Transitions live as methods on the structs so
//! they can be exercised natively without a reactive runtime.

pub mod session;
pub mod toasts;
