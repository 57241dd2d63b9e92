//! Types shared between the chat widget and the backends it talks to.
//!
//! The chat widget never speaks HTTP directly. It holds a [`ChatService`]
//! and only deals with the already validated values defined here, so a
//! backend is free to choose its own transport and wire format as long as
//! it maps the results onto these types.

#![deny(missing_docs)]

mod error;
mod request;
mod response;
mod service;

pub use error::*;
pub use request::*;
pub use response::*;
pub use service::*;
