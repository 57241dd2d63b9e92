use std::error::Error;

use crate::error::ErrorKind;
use crate::request::ChatRequest;
use crate::response::{ChatResponse, HealthStatus, ModelsInfo, ReloadStatus};

/// The error type for a failed round trip to a chat service.
pub trait TransportError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A remote chat service, the only collaborator of the chat widget.
///
/// Every method performs exactly one round trip. Implementations must not
/// retry, and the returned futures must not borrow from `self`, so that
/// callers can drive them while mutating their own state.
pub trait ChatService {
    /// The error type that may be returned by the service.
    type Error: TransportError;

    /// Sends a user message and waits for the complete answer.
    fn chat(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatResponse, Self::Error>> + Send + 'static;

    /// Probes the readiness of the service.
    fn health(
        &self,
    ) -> impl Future<Output = Result<HealthStatus, Self::Error>> + Send + 'static;

    /// Asks the service to reload its knowledge base.
    fn reload(
        &self,
    ) -> impl Future<Output = Result<ReloadStatus, Self::Error>> + Send + 'static;

    /// Fetches the model configuration of the service.
    fn models(
        &self,
    ) -> impl Future<Output = Result<ModelsInfo, Self::Error>> + Send + 'static;
}
