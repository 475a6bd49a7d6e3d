//! Client-side conversation controller for the Job Application Helper.
//!
//! A [`Session`] owns the conversation log, sends chat messages to the
//! assistant service, scrubs the replies, and uploads documents through a
//! transient status line. The Dioxus front end lives behind the `dioxus`
//! feature.

pub mod backend;
pub mod config;
pub mod controller;
pub mod sanitize;
pub mod session;
pub mod store;
pub mod types;
pub mod upload;

#[cfg(feature = "dioxus")]
pub mod ui;
#[cfg(feature = "dioxus")]
pub mod views;

pub use config::ClientConfig;
pub use controller::{ChatController, SendOutcome};
pub use session::Session;
