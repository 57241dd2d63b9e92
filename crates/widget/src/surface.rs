use crate::transcript::RenderedEntry;

/// State of the send control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SendControl {
    /// Enabled, waiting for input.
    #[default]
    Ready,
    /// Disabled while a round trip is in flight.
    Busy,
}

impl SendControl {
    /// Returns whether the control accepts activation.
    #[inline]
    pub fn is_enabled(self) -> bool {
        self == SendControl::Ready
    }

    /// Returns the label shown on the control.
    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            SendControl::Ready => "Send",
            SendControl::Busy => "Thinking...",
        }
    }
}

/// Something that draws the transcript.
///
/// Surface methods are called synchronously from the widget handlers and
/// must not call back into the widget.
pub trait TranscriptSurface {
    /// Appends a visual node for the entry after all previous ones.
    fn append_entry(&mut self, entry: &RenderedEntry<'_>);

    /// Brings the newest entry into view.
    fn scroll_to_latest(&mut self) {}

    /// Reflects a change of the send control.
    fn update_send_control(&mut self, _control: SendControl) {}
}
