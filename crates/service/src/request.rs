/// Optional tuning parameters forwarded with every chat request.
///
/// Unset fields are left to the service defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChatOptions {
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Upper bound of tokens in the reply.
    pub max_tokens: Option<u32>,
    /// Number of knowledge base documents retrieved as context.
    pub top_k: Option<u32>,
}

/// A single user message sent to the chat service.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatRequest {
    /// The trimmed user message.
    pub message: String,
    /// Tuning parameters.
    pub options: ChatOptions,
}

impl ChatRequest {
    /// Creates a request with default options.
    #[inline]
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            options: Default::default(),
        }
    }

    /// Replaces the tuning parameters.
    #[inline]
    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }
}
