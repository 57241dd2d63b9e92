//! The chat widget: an append-only transcript, a send control and the
//! handlers that drive one chat service round trip per user action.
//!
//! The widget does not know how it is drawn. Everything visible goes
//! through a [`TranscriptSurface`], which can be a terminal, a GUI list or
//! a plain buffer in tests.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod event;
mod surface;
pub mod transcript;
mod widget;

pub use event::{Key, KeyPress, Propagation, WidgetEvent};
pub use surface::{SendControl, TranscriptSurface};
pub use transcript::{
    RenderedEntry, ReplyMetadata, Speaker, Transcript, TranscriptEntry,
};
pub use widget::{ChatWidget, ChatWidgetBuilder, messages};
