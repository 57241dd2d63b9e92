//! A local fake chat service for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use coach_chat_service::{
    ChatRequest, ChatResponse, ChatService, ErrorKind, HealthStatus,
    ModelsInfo, ReloadStatus, TransportError,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.message, self.kind)
    }
}

impl StdError for Error {}

impl TransportError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Default)]
struct Script {
    chats: VecDeque<PresetChat>,
    health: Option<Preset<HealthStatus>>,
    reload: Option<Preset<ReloadStatus>>,
    models: Option<Preset<ModelsInfo>>,
    requests: Vec<ChatRequest>,
    health_probes: usize,
}

/// A chat service that answers from a script.
///
/// Clones share the same script, so a test can keep one clone to inspect
/// the recorded requests after handing another to the code under test.
#[derive(Clone, Default)]
pub struct TestChatService {
    script: Arc<Mutex<Script>>,
    delay: Option<Duration>,
    health_delay: Option<Duration>,
}

impl TestChatService {
    /// Sets a delay applied before every answer.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sets a delay applied before health answers only, overriding the
    /// common delay.
    pub fn with_health_delay(mut self, delay: Duration) -> Self {
        self.health_delay = Some(delay);
        self
    }

    /// Queues the answer for the next chat request.
    pub fn push_chat(&self, chat: PresetChat) {
        self.script().chats.push_back(chat);
    }

    /// Sets the answer for every health probe.
    pub fn set_health(&self, health: Preset<HealthStatus>) {
        self.script().health = Some(health);
    }

    /// Sets the answer for every reload request.
    pub fn set_reload(&self, reload: Preset<ReloadStatus>) {
        self.script().reload = Some(reload);
    }

    /// Sets the answer for every models request.
    pub fn set_models(&self, models: Preset<ModelsInfo>) {
        self.script().models = Some(models);
    }

    /// Returns the chat requests received so far.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.script().requests.clone()
    }

    /// Returns how many health probes were received.
    pub fn health_probes(&self) -> usize {
        self.script().health_probes
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|err| err.into_inner())
    }
}

async fn answer<T>(
    delay: Option<Duration>,
    result: Result<T, Error>,
) -> Result<T, Error> {
    if let Some(delay) = delay {
        sleep(delay).await;
    }
    result
}

fn from_preset<T>(preset: Option<Preset<T>>) -> Result<T, Error> {
    match preset {
        Some(Preset::Ok(value)) => Ok(value),
        Some(Preset::Fail(kind)) => Err(Error {
            message: "scripted failure",
            kind,
        }),
        None => Err(Error {
            message: "not scripted",
            kind: ErrorKind::Unreachable,
        }),
    }
}

impl ChatService for TestChatService {
    type Error = Error;

    fn chat(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatResponse, Self::Error>> + Send + 'static
    {
        let result = {
            let mut script = self.script();
            script.requests.push(req.clone());
            match script.chats.pop_front() {
                Some(PresetChat::Reply(reply)) => Ok(ChatResponse::Reply(reply)),
                Some(PresetChat::ServiceError(error)) => {
                    Ok(ChatResponse::Error(error))
                }
                Some(PresetChat::Fail(kind)) => Err(Error {
                    message: "scripted failure",
                    kind,
                }),
                None => Err(Error {
                    message: "no more scripted chats",
                    kind: ErrorKind::Unreachable,
                }),
            }
        };
        answer(self.delay, result)
    }

    fn health(
        &self,
    ) -> impl Future<Output = Result<HealthStatus, Self::Error>> + Send + 'static
    {
        let result = {
            let mut script = self.script();
            script.health_probes += 1;
            from_preset(script.health.clone())
        };
        answer(self.health_delay.or(self.delay), result)
    }

    fn reload(
        &self,
    ) -> impl Future<Output = Result<ReloadStatus, Self::Error>> + Send + 'static
    {
        let result = from_preset(self.script().reload.clone());
        answer(self.delay, result)
    }

    fn models(
        &self,
    ) -> impl Future<Output = Result<ModelsInfo, Self::Error>> + Send + 'static
    {
        let result = from_preset(self.script().models.clone());
        answer(self.delay, result)
    }
}

#[cfg(test)]
mod tests {
    use coach_chat_service::ChatReply;

    use super::*;

    #[tokio::test]
    async fn test_script_is_consumed_in_order() {
        let service = TestChatService::default();
        service.push_chat(PresetChat::reply("first"));
        service.push_chat(PresetChat::ServiceError("second".to_owned()));

        let first = service.chat(&ChatRequest::new("a")).await.unwrap();
        assert_eq!(first, ChatResponse::Reply(ChatReply::new("first")));
        let second = service.chat(&ChatRequest::new("b")).await.unwrap();
        assert_eq!(second, ChatResponse::Error("second".to_owned()));
        let third = service.chat(&ChatRequest::new("c")).await.unwrap_err();
        assert_eq!(third.kind(), ErrorKind::Unreachable);

        let messages: Vec<_> =
            service.requests().into_iter().map(|r| r.message).collect();
        assert_eq!(messages, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_health_preset() {
        let service = TestChatService::default();
        assert!(service.health().await.is_err());

        service.set_health(Preset::Ok(healthy(3, "m")));
        let health = service.health().await.unwrap();
        assert_eq!(health.documents, Some(3));
        assert_eq!(service.health_probes(), 2);
    }
}
