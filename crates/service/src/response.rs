use serde::Deserialize;

/// The validated answer to a [`ChatRequest`](crate::ChatRequest).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatResponse {
    /// The service produced a reply.
    Reply(ChatReply),
    /// The service understood the request but reported an error.
    Error(String),
}

/// A successful reply with the auxiliary fields the service attached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatReply {
    /// The reply text.
    pub text: String,
    /// Name of the model that generated the reply.
    pub model: Option<String>,
    /// Number of knowledge base documents used as context.
    pub context_count: Option<u64>,
    /// Tokens consumed by the generation.
    pub total_tokens: Option<u64>,
    /// Titles of the documents used as context, in retrieval order.
    pub sources: Vec<String>,
}

impl ChatReply {
    /// Creates a reply without any metadata.
    #[inline]
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Readiness report of the service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    /// Whether the knowledge base has been loaded.
    pub knowledge_base_loaded: bool,
    /// Number of loaded documents.
    #[serde(default)]
    pub documents: Option<u64>,
    /// The language model in use.
    #[serde(default)]
    pub llm_model: Option<String>,
    /// A short machine-readable status, e.g. `healthy`.
    #[serde(default)]
    pub status: Option<String>,
    /// Whether document embeddings are available.
    #[serde(default)]
    pub embeddings_computed: Option<bool>,
    /// The embedding model in use.
    #[serde(default)]
    pub embedding_model: Option<String>,
}

/// Model configuration of the service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ModelsInfo {
    /// The language model.
    #[serde(default)]
    pub llm_model: Option<String>,
    /// The embedding model.
    #[serde(default)]
    pub embedding_model: Option<String>,
    /// The upstream inference endpoint.
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Result of reloading the knowledge base.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ReloadStatus {
    /// A short status string, e.g. `reloaded`.
    #[serde(default)]
    pub status: Option<String>,
    /// Number of documents after reloading.
    pub documents: u64,
}
