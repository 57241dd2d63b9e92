//! Transcript-related types.

use coach_chat_service::ChatReply;

/// Who an entry belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Speaker {
    /// The person typing into the widget.
    User,
    /// The chat service or the widget itself.
    Bot,
}

/// Auxiliary fields attached to a bot reply.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplyMetadata {
    /// Name of the model that generated the reply.
    pub model: Option<String>,
    /// Number of documents used as context.
    pub context_count: Option<u64>,
    /// Tokens consumed by the generation.
    pub total_tokens: Option<u64>,
    /// Titles of the documents used as context.
    pub sources: Vec<String>,
}

impl ReplyMetadata {
    /// Returns the one-line summary of model, context and token usage.
    ///
    /// Fields are emitted as `Label: value | ` fragments in a fixed order.
    /// Missing fields, an empty model name and zero counts are skipped, and
    /// `None` is returned if nothing is left to show.
    pub fn summary_line(&self) -> Option<String> {
        let mut line = String::new();
        if let Some(model) = self.model.as_deref().filter(|m| !m.is_empty()) {
            line.push_str(&format!("Model: {model} | "));
        }
        if let Some(count) = self.context_count.filter(|c| *c > 0) {
            line.push_str(&format!("Sources: {count} | "));
        }
        if let Some(tokens) = self.total_tokens.filter(|t| *t > 0) {
            line.push_str(&format!("Tokens: {tokens} | "));
        }
        (!line.is_empty()).then_some(line)
    }

    /// Returns the line listing the source titles, if there are any.
    pub fn sources_line(&self) -> Option<String> {
        if self.sources.is_empty() {
            return None;
        }
        Some(format!("Sources: {}", self.sources.join(", ")))
    }
}

/// An item in the transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptEntry {
    text: String,
    speaker: Speaker,
    metadata: Option<ReplyMetadata>,
}

impl TranscriptEntry {
    /// Creates an entry for user input.
    #[inline]
    pub fn user<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            speaker: Speaker::User,
            metadata: None,
        }
    }

    /// Creates a bot entry without metadata.
    #[inline]
    pub fn bot<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            speaker: Speaker::Bot,
            metadata: None,
        }
    }

    /// Creates a bot entry carrying reply metadata.
    #[inline]
    pub fn bot_with_metadata<S: Into<String>>(
        text: S,
        metadata: ReplyMetadata,
    ) -> Self {
        Self {
            text: text.into(),
            speaker: Speaker::Bot,
            metadata: Some(metadata),
        }
    }

    /// Returns the text of this entry.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns who this entry belongs to.
    #[inline]
    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    /// Returns whether this entry is user input.
    #[inline]
    pub fn is_user(&self) -> bool {
        self.speaker == Speaker::User
    }

    /// Returns the reply metadata, which only bot entries may carry.
    #[inline]
    pub fn metadata(&self) -> Option<&ReplyMetadata> {
        self.metadata.as_ref()
    }
}

impl From<ChatReply> for TranscriptEntry {
    fn from(reply: ChatReply) -> Self {
        let ChatReply {
            text,
            model,
            context_count,
            total_tokens,
            sources,
        } = reply;
        Self::bot_with_metadata(
            text,
            ReplyMetadata {
                model,
                context_count,
                total_tokens,
                sources,
            },
        )
    }
}

/// An entry together with the secondary lines drawn beneath it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedEntry<'a> {
    entry: &'a TranscriptEntry,
    summary_line: Option<String>,
    sources_line: Option<String>,
}

impl<'a> RenderedEntry<'a> {
    /// Renders the secondary lines of `entry`.
    ///
    /// User entries and entries without metadata have no secondary lines.
    pub fn new(entry: &'a TranscriptEntry) -> Self {
        let metadata = entry.metadata().filter(|_| !entry.is_user());
        Self {
            entry,
            summary_line: metadata.and_then(ReplyMetadata::summary_line),
            sources_line: metadata.and_then(ReplyMetadata::sources_line),
        }
    }

    /// Returns the underlying entry.
    #[inline]
    pub fn entry(&self) -> &'a TranscriptEntry {
        self.entry
    }

    /// Returns the main text.
    #[inline]
    pub fn text(&self) -> &'a str {
        self.entry.text()
    }

    /// Returns the metadata summary line.
    #[inline]
    pub fn summary_line(&self) -> Option<&str> {
        self.summary_line.as_deref()
    }

    /// Returns the sources line.
    #[inline]
    pub fn sources_line(&self) -> Option<&str> {
        self.sources_line.as_deref()
    }
}

/// The ordered list of exchanged messages.
///
/// Entries can only be appended, never changed or removed.
#[derive(Clone, Default, Debug)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Returns all entries in insertion order.
    #[inline]
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the transcript has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the newest entry.
    #[inline]
    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    #[inline]
    pub(crate) fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line_skips_missing_fields() {
        let metadata = ReplyMetadata {
            model: Some("x".to_owned()),
            context_count: Some(2),
            ..Default::default()
        };
        assert_eq!(
            metadata.summary_line().as_deref(),
            Some("Model: x | Sources: 2 | ")
        );
    }

    #[test]
    fn test_summary_line_field_order() {
        let metadata = ReplyMetadata {
            model: Some("llama".to_owned()),
            context_count: Some(3),
            total_tokens: Some(512),
            sources: vec![],
        };
        assert_eq!(
            metadata.summary_line().as_deref(),
            Some("Model: llama | Sources: 3 | Tokens: 512 | ")
        );

        let metadata = ReplyMetadata {
            total_tokens: Some(7),
            ..Default::default()
        };
        assert_eq!(metadata.summary_line().as_deref(), Some("Tokens: 7 | "));
    }

    #[test]
    fn test_summary_line_skips_zero_and_empty() {
        let metadata = ReplyMetadata {
            model: Some(String::new()),
            context_count: Some(0),
            total_tokens: Some(0),
            sources: vec![],
        };
        assert_eq!(metadata.summary_line(), None);
    }

    #[test]
    fn test_sources_line() {
        let metadata = ReplyMetadata {
            sources: vec!["BMX basics".to_owned(), "Warm-ups".to_owned()],
            ..Default::default()
        };
        assert_eq!(
            metadata.sources_line().as_deref(),
            Some("Sources: BMX basics, Warm-ups")
        );
        assert_eq!(ReplyMetadata::default().sources_line(), None);
    }

    #[test]
    fn test_rendered_entry_lines() {
        let reply = ChatReply {
            text: "hi".to_owned(),
            model: Some("x".to_owned()),
            context_count: Some(2),
            total_tokens: None,
            sources: vec!["Intro".to_owned()],
        };
        let entry = TranscriptEntry::from(reply);
        let rendered = RenderedEntry::new(&entry);
        assert_eq!(rendered.text(), "hi");
        assert_eq!(rendered.summary_line(), Some("Model: x | Sources: 2 | "));
        assert_eq!(rendered.sources_line(), Some("Sources: Intro"));

        let entry = TranscriptEntry::user("hello");
        let rendered = RenderedEntry::new(&entry);
        assert_eq!(rendered.summary_line(), None);
        assert_eq!(rendered.sources_line(), None);

        let entry = TranscriptEntry::bot("Error: bad request");
        let rendered = RenderedEntry::new(&entry);
        assert_eq!(rendered.summary_line(), None);
        assert_eq!(rendered.sources_line(), None);
    }
}
