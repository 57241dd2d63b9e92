use coach_chat_service::{ChatOptions, ChatService};

use super::{ChatWidget, messages};
use crate::surface::TranscriptSurface;

/// [`ChatWidget`] builder.
pub struct ChatWidgetBuilder<S> {
    pub(crate) service: S,
    pub(crate) greeting: String,
    pub(crate) chat_options: ChatOptions,
}

impl<S: ChatService> ChatWidgetBuilder<S> {
    /// Creates a new builder with the specified chat service.
    #[inline]
    pub fn with_service(service: S) -> Self {
        Self {
            service,
            greeting: messages::GREETING.to_owned(),
            chat_options: Default::default(),
        }
    }

    /// Replaces the greeting rendered on initialization.
    #[inline]
    pub fn with_greeting<T: Into<String>>(mut self, greeting: T) -> Self {
        self.greeting = greeting.into();
        self
    }

    /// Sets the tuning parameters sent with every chat request.
    #[inline]
    pub fn with_chat_options(mut self, options: ChatOptions) -> Self {
        self.chat_options = options;
        self
    }

    /// Builds the widget drawing on `surface`.
    #[inline]
    pub fn build<V: TranscriptSurface>(self, surface: V) -> ChatWidget<S, V> {
        ChatWidget::from_builder(self, surface)
    }
}
