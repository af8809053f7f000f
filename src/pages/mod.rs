//! Routed pages. Every page is a leaf consumer of the session state; none
//! of them are depended on by anything else.

pub mod game;
pub mod home;
pub mod login;
pub mod profile;
pub mod register;
pub mod reset_password;
pub mod store;
pub mod wiki;
pub mod wiki_create;
