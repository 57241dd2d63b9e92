//! A chat service backed by the coach bot HTTP API.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use coach_chat_service::{
    ChatRequest, ChatResponse, ChatService, ErrorKind, HealthStatus,
    ModelsInfo, ReloadStatus, TransportError,
};
use mime::Mime;
use reqwest::{Client, Response, header};
use serde::de::DeserializeOwned;

pub use config::{HttpServiceConfig, HttpServiceConfigBuilder};
use proto::ChatResponseBody;

/// Error type for [`HttpChatService`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl TransportError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// Chat service speaking JSON over HTTP.
#[derive(Clone, Debug)]
pub struct HttpChatService {
    client: Client,
    config: Arc<HttpServiceConfig>,
}

impl HttpChatService {
    /// Creates a new `HttpChatService` with the given configuration.
    #[inline]
    pub fn new(config: HttpServiceConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    /// Returns the configuration of this service.
    #[inline]
    pub fn config(&self) -> &HttpServiceConfig {
        &self.config
    }
}

impl ChatService for HttpChatService {
    type Error = Error;

    fn chat(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatResponse, Self::Error>> + Send + 'static
    {
        let url = self.config.endpoint("/chat");
        debug!("sending chat request to {url}");
        let resp_fut = self
            .client
            .post(url)
            .header(header::ACCEPT, "application/json")
            .json(&proto::create_request(req))
            .send();

        async move {
            let resp = resp_fut.await.map_err(connection_error)?;
            let status = resp.status();
            if !status.is_success() {
                // The server reports rejected and failed requests with an
                // error payload, which is not a transport failure.
                let body = resp.bytes().await.map_err(connection_error)?;
                trace!("got error body: {}", String::from_utf8_lossy(&body));
                let error = serde_json::from_slice::<ChatResponseBody>(&body)
                    .ok()
                    .and_then(ChatResponseBody::into_error);
                return match error {
                    Some(error) => Ok(ChatResponse::Error(error)),
                    None => Err(Error::new(
                        format!("unexpected status: {status}"),
                        ErrorKind::BadStatus,
                    )),
                };
            }

            let body: ChatResponseBody = read_json(resp).await?;
            body.into_response().ok_or_else(|| {
                Error::new(
                    "response carries neither a reply nor an error",
                    ErrorKind::MalformedPayload,
                )
            })
        }
    }

    fn health(
        &self,
    ) -> impl Future<Output = Result<HealthStatus, Self::Error>> + Send + 'static
    {
        let resp_fut = self.client.get(self.config.endpoint("/health")).send();
        fetch_json(resp_fut)
    }

    fn reload(
        &self,
    ) -> impl Future<Output = Result<ReloadStatus, Self::Error>> + Send + 'static
    {
        let resp_fut = self.client.post(self.config.endpoint("/reload")).send();
        fetch_json(resp_fut)
    }

    fn models(
        &self,
    ) -> impl Future<Output = Result<ModelsInfo, Self::Error>> + Send + 'static
    {
        let resp_fut = self.client.get(self.config.endpoint("/models")).send();
        fetch_json(resp_fut)
    }
}

#[inline]
fn connection_error(err: reqwest::Error) -> Error {
    Error::new(format!("{err}"), ErrorKind::Unreachable)
}

async fn fetch_json<T, F>(resp_fut: F) -> Result<T, Error>
where
    T: DeserializeOwned + Send,
    F: Future<Output = reqwest::Result<Response>> + Send,
{
    let resp = resp_fut
        .await
        .map_err(connection_error)?
        .error_for_status()
        .map_err(|err| Error::new(format!("{err}"), ErrorKind::BadStatus))?;
    read_json(resp).await
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, Error> {
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    // A missing header is tolerated, a non-JSON one is not.
    if let Some(content_type) = content_type {
        let is_json = content_type
            .parse()
            .map(|m: Mime| {
                m.subtype() == mime::JSON
                    || m.suffix().is_some_and(|s| s == mime::JSON)
            })
            .unwrap_or(false);
        if !is_json {
            return Err(Error::new(
                format!("unexpected content type: {content_type}"),
                ErrorKind::MalformedPayload,
            ));
        }
    }

    let body = resp.bytes().await.map_err(connection_error)?;
    trace!("got body: {}", String::from_utf8_lossy(&body));
    serde_json::from_slice(&body)
        .map_err(|err| Error::new(format!("{err}"), ErrorKind::MalformedPayload))
}
