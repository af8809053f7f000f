//! Backend client and session synchronization.
//!
//! DESIGN
//! ======
//! `backend` defines the backend-as-a-service contract as a trait so the
//! session synchronizer is testable against a fake; `supabase` is the
//! production implementation of that trait; `session_sync` owns the
//! sign-in/sign-up/sign-out/reset lifecycle on top of it.

pub mod backend;
pub mod session_sync;
pub mod supabase;
