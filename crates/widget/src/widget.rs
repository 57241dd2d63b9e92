mod builder;

use std::cell::{Cell, Ref, RefCell};

use coach_chat_service::{
    ChatOptions, ChatRequest, ChatResponse, ChatService, TransportError,
};

pub use builder::ChatWidgetBuilder;

use crate::event::{Propagation, WidgetEvent};
use crate::surface::{SendControl, TranscriptSurface};
use crate::transcript::{RenderedEntry, Transcript, TranscriptEntry};

/// Fixed texts shown by the widget.
pub mod messages {
    /// Default greeting rendered on initialization.
    pub const GREETING: &str = "🤖 Hi! I'm your AI Coach Bot powered by NVIDIA NIMs. Ask me anything about BMX, fitness, or products!";
    /// Shown when a chat round trip fails.
    pub const CONNECTION_FAILURE: &str =
        "Sorry, there was an error connecting to the server.";
    /// Shown when the service reports an unloaded knowledge base.
    pub const KNOWLEDGE_BASE_NOT_LOADED: &str =
        "⚠️ Knowledge base not loaded. Some features may not work.";
    /// Shown when the health probe fails.
    pub const SERVER_UNREACHABLE: &str = "⚠️ Could not connect to server. Please check if the backend is running.";
    /// Shown when reloading the knowledge base fails.
    pub const RELOAD_FAILURE: &str = "⚠️ Could not reload the knowledge base.";
    /// Shown when fetching the model configuration fails.
    pub const MODELS_FAILURE: &str = "⚠️ Could not fetch model configuration.";
}

/// A chat widget, which owns the transcript, the input buffer and the send
/// control, and talks to a single chat service.
///
/// All handlers take `&self` and may be driven concurrently on one thread.
/// State is only touched between suspension points, so handlers never
/// observe each other half-way. While a round trip is in flight the send
/// control is [`SendControl::Busy`], and any further trigger is ignored
/// without touching the input buffer.
pub struct ChatWidget<S, V> {
    service: S,
    surface: RefCell<V>,
    transcript: RefCell<Transcript>,
    input: RefCell<String>,
    send_control: Cell<SendControl>,
    initialized: Cell<bool>,
    greeting: String,
    chat_options: ChatOptions,
}

impl<S: ChatService, V: TranscriptSurface> ChatWidget<S, V> {
    fn from_builder(builder: ChatWidgetBuilder<S>, surface: V) -> Self {
        let ChatWidgetBuilder {
            service,
            greeting,
            chat_options,
        } = builder;

        Self {
            service,
            surface: RefCell::new(surface),
            transcript: Default::default(),
            input: Default::default(),
            send_control: Default::default(),
            initialized: Cell::new(false),
            greeting,
            chat_options,
        }
    }

    /// Returns the transcript.
    #[inline]
    pub fn transcript(&self) -> Ref<'_, Transcript> {
        self.transcript.borrow()
    }

    /// Returns the surface the widget draws on.
    #[inline]
    pub fn surface(&self) -> Ref<'_, V> {
        self.surface.borrow()
    }

    /// Returns the chat service.
    #[inline]
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Returns the current state of the send control.
    #[inline]
    pub fn send_control(&self) -> SendControl {
        self.send_control.get()
    }

    /// Returns the content of the input buffer.
    #[inline]
    pub fn input(&self) -> String {
        self.input.borrow().clone()
    }

    /// Replaces the content of the input buffer.
    pub fn set_input<T: Into<String>>(&self, text: T) {
        *self.input.borrow_mut() = text.into();
    }

    /// Renders the greeting and returns the health probe.
    ///
    /// The greeting is rendered before this returns. The probe is left to
    /// the caller, which should drive it next to its input handling rather
    /// than before it, so a slow service never holds back the first send.
    /// Only the first call has an effect; later calls return a probe that
    /// does nothing.
    pub fn initialize(&self) -> impl Future<Output = ()> + '_ {
        let first = !self.initialized.replace(true);
        if first {
            self.render_entry(TranscriptEntry::bot(self.greeting.clone()));
        }
        async move {
            if first {
                self.check_health().await;
            }
        }
    }

    /// Dispatches an input event to its handler.
    pub async fn handle_event(&self, event: WidgetEvent) -> Propagation {
        match event {
            WidgetEvent::SendActivated => {
                self.submit_message().await;
                Propagation::Continue
            }
            WidgetEvent::KeyPressed(key_press) if key_press.requests_submit() => {
                self.submit_message().await;
                Propagation::PreventDefault
            }
            WidgetEvent::KeyPressed(_) => Propagation::Continue,
        }
    }

    /// Appends an entry to the transcript and draws it.
    pub fn render_entry(&self, entry: TranscriptEntry) {
        {
            let rendered = RenderedEntry::new(&entry);
            let mut surface = self.surface.borrow_mut();
            surface.append_entry(&rendered);
            surface.scroll_to_latest();
        }
        self.transcript.borrow_mut().push(entry);
    }

    /// Sends the trimmed input buffer to the service and renders the answer.
    ///
    /// Does nothing if the input is blank or another round trip is in
    /// flight. Otherwise exactly one user entry is rendered right away and
    /// exactly one bot entry once the round trip settles.
    pub async fn submit_message(&self) {
        if !self.send_control.get().is_enabled() {
            debug!("a round trip is in flight, ignoring submit");
            return;
        }
        let message = self.input.borrow().trim().to_owned();
        if message.is_empty() {
            return;
        }

        self.render_entry(TranscriptEntry::user(message.clone()));
        self.input.borrow_mut().clear();
        let _busy = self.begin_busy();

        let req = ChatRequest::new(message).with_options(self.chat_options);
        debug!("sending chat request: {req:?}");
        let entry = match self.service.chat(&req).await {
            Ok(ChatResponse::Reply(reply)) => TranscriptEntry::from(reply),
            Ok(ChatResponse::Error(error)) => {
                debug!("service reported an error: {error}");
                TranscriptEntry::bot(format!("Error: {error}"))
            }
            Err(err) => {
                error!("chat request failed ({:?}): {err}", err.kind());
                TranscriptEntry::bot(messages::CONNECTION_FAILURE)
            }
        };
        self.render_entry(entry);
    }

    /// Probes the service and renders its readiness.
    ///
    /// A loaded report missing its document count or model name renders
    /// them as `0` and `unknown`.
    pub async fn check_health(&self) {
        let text = match self.service.health().await {
            Ok(health) if health.knowledge_base_loaded => format!(
                "✅ System ready! Loaded {} documents with {}",
                health.documents.unwrap_or(0),
                health.llm_model.as_deref().unwrap_or("unknown"),
            ),
            Ok(health) => {
                debug!("knowledge base not loaded: {health:?}");
                messages::KNOWLEDGE_BASE_NOT_LOADED.to_owned()
            }
            Err(err) => {
                warn!("health probe failed ({:?}): {err}", err.kind());
                messages::SERVER_UNREACHABLE.to_owned()
            }
        };
        self.render_entry(TranscriptEntry::bot(text));
    }

    /// Asks the service to reload its knowledge base and renders the result.
    ///
    /// Ignored while another round trip is in flight.
    pub async fn reload_knowledge_base(&self) {
        let Some(_busy) = self.try_begin_busy() else {
            debug!("a round trip is in flight, ignoring reload");
            return;
        };
        let text = match self.service.reload().await {
            Ok(status) => format!(
                "🔄 Knowledge base reloaded: {} documents",
                status.documents
            ),
            Err(err) => {
                warn!("reload failed ({:?}): {err}", err.kind());
                messages::RELOAD_FAILURE.to_owned()
            }
        };
        self.render_entry(TranscriptEntry::bot(text));
    }

    /// Fetches the model configuration of the service and renders it.
    ///
    /// Ignored while another round trip is in flight.
    pub async fn show_models(&self) {
        let Some(_busy) = self.try_begin_busy() else {
            debug!("a round trip is in flight, ignoring models request");
            return;
        };
        let text = match self.service.models().await {
            Ok(models) => format!(
                "Models: LLM {} | Embeddings {} | Endpoint {}",
                models.llm_model.as_deref().unwrap_or("unknown"),
                models.embedding_model.as_deref().unwrap_or("unknown"),
                models.base_url.as_deref().unwrap_or("unknown"),
            ),
            Err(err) => {
                warn!("models request failed ({:?}): {err}", err.kind());
                messages::MODELS_FAILURE.to_owned()
            }
        };
        self.render_entry(TranscriptEntry::bot(text));
    }

    fn try_begin_busy(&self) -> Option<BusyGuard<'_, V>> {
        if !self.send_control.get().is_enabled() {
            return None;
        }
        Some(self.begin_busy())
    }

    fn begin_busy(&self) -> BusyGuard<'_, V> {
        set_send_control(&self.send_control, &self.surface, SendControl::Busy);
        BusyGuard {
            send_control: &self.send_control,
            surface: &self.surface,
        }
    }
}

/// Restores the send control when dropped, on every exit path of a handler
/// including the handler future being dropped mid-flight.
struct BusyGuard<'a, V: TranscriptSurface> {
    send_control: &'a Cell<SendControl>,
    surface: &'a RefCell<V>,
}

impl<V: TranscriptSurface> Drop for BusyGuard<'_, V> {
    fn drop(&mut self) {
        set_send_control(self.send_control, self.surface, SendControl::Ready);
    }
}

fn set_send_control<V: TranscriptSurface>(
    cell: &Cell<SendControl>,
    surface: &RefCell<V>,
    control: SendControl,
) {
    cell.set(control);
    surface.borrow_mut().update_send_control(control);
}
