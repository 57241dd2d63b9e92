use coach_chat_service::{ChatReply, ErrorKind, HealthStatus};

/// A scripted outcome of a single round trip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Preset<T> {
    /// The round trip succeeds with the given value.
    Ok(T),
    /// The round trip fails with a transport error of the given kind.
    Fail(ErrorKind),
}

/// A scripted answer to a chat request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PresetChat {
    /// The service replies.
    Reply(ChatReply),
    /// The service reports an error in its payload.
    ServiceError(String),
    /// The round trip fails.
    Fail(ErrorKind),
}

impl PresetChat {
    /// A reply without metadata.
    #[inline]
    pub fn reply<S: Into<String>>(text: S) -> Self {
        Self::Reply(ChatReply::new(text))
    }
}

/// A health answer for a loaded knowledge base.
pub fn healthy(documents: u64, llm_model: &str) -> HealthStatus {
    HealthStatus {
        knowledge_base_loaded: true,
        documents: Some(documents),
        llm_model: Some(llm_model.to_owned()),
        status: Some("healthy".to_owned()),
        ..Default::default()
    }
}
