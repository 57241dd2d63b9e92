//! A terminal client for the coach bot chat service.
//!
//! The crate includes the `coach-chat` CLI. As a library it bundles the
//! widget, the HTTP backend and a terminal surface, so other hosts can put
//! the same chat into their own front-ends.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

mod command;
mod config;
#[cfg(feature = "cli")]
pub mod terminal;

pub use command::Command;
pub use config::{ClientConfig, ConfigError};

/// Re-exports of [`coach_chat_service`] crate.
pub mod service {
    pub use coach_chat_service::*;
}

/// Re-exports of [`coach_chat_http_service`] crate.
pub mod http {
    pub use coach_chat_http_service::*;
}

/// Re-exports of [`coach_chat_widget`] crate.
pub mod widget {
    pub use coach_chat_widget::*;
}
