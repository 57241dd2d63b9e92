use coach_chat_service::{ChatOptions, ChatReply, ChatRequest, ChatResponse};
use serde::{Deserialize, Serialize};

// ------------------------------
// Types received from the server
// ------------------------------

/// Body of a `/chat` answer before validation.
///
/// The server sends `error: null` alongside successful replies, and both
/// `reply` and `error` when the generation failed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ChatResponseBody {
    pub reply: Option<String>,
    pub error: Option<String>,
    pub model: Option<String>,
    pub context_count: Option<u64>,
    pub total_tokens: Option<u64>,
    pub sources: Option<Vec<String>>,
}

impl ChatResponseBody {
    /// Validates the body, returning `None` if it carries neither an error
    /// nor a reply.
    pub fn into_response(self) -> Option<ChatResponse> {
        if let Some(error) = self.error.filter(|e| !e.is_empty()) {
            return Some(ChatResponse::Error(error));
        }
        let text = self.reply?;
        Some(ChatResponse::Reply(ChatReply {
            text,
            model: self.model,
            context_count: self.context_count,
            total_tokens: self.total_tokens,
            sources: self.sources.unwrap_or_default(),
        }))
    }

    /// Returns the service error carried by the body, if any.
    pub fn into_error(self) -> Option<String> {
        self.error.filter(|e| !e.is_empty())
    }
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatRequestBody<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
}

pub fn create_request(req: &ChatRequest) -> ChatRequestBody<'_> {
    let ChatOptions {
        temperature,
        max_tokens,
        top_k,
    } = req.options;
    ChatRequestBody {
        message: &req.message,
        temperature,
        max_tokens,
        top_k,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(value: serde_json::Value) -> Option<ChatResponse> {
        serde_json::from_value::<ChatResponseBody>(value)
            .unwrap()
            .into_response()
    }

    #[test]
    fn test_reply_with_null_error() {
        let response = parse(json!({
            "reply": "hi",
            "model": "x",
            "context_count": 2,
            "sources": ["Intro to BMX"],
            "error": null
        }));
        assert_eq!(
            response,
            Some(ChatResponse::Reply(ChatReply {
                text: "hi".to_owned(),
                model: Some("x".to_owned()),
                context_count: Some(2),
                total_tokens: None,
                sources: vec!["Intro to BMX".to_owned()],
            }))
        );
    }

    #[test]
    fn test_error_wins_over_reply() {
        let response = parse(json!({
            "reply": "I apologize, but I encountered an error: boom",
            "sources": [],
            "error": "boom"
        }));
        assert_eq!(response, Some(ChatResponse::Error("boom".to_owned())));
    }

    #[test]
    fn test_empty_error_is_ignored() {
        let response = parse(json!({ "reply": "ok", "error": "" }));
        assert!(matches!(response, Some(ChatResponse::Reply(_))));
    }

    #[test]
    fn test_neither_reply_nor_error() {
        assert_eq!(parse(json!({ "model": "x" })), None);
    }

    #[test]
    fn test_request_skips_unset_options() {
        let req = ChatRequest::new("hello");
        let body = serde_json::to_value(create_request(&req)).unwrap();
        assert_eq!(body, json!({ "message": "hello" }));

        let req = ChatRequest::new("hello").with_options(ChatOptions {
            top_k: Some(5),
            ..Default::default()
        });
        let body = serde_json::to_value(create_request(&req)).unwrap();
        assert_eq!(body, json!({ "message": "hello", "top_k": 5 }));
    }
}
