/// A slash command typed at the prompt instead of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Reload the knowledge base of the service.
    Reload,
    /// Show the model configuration of the service.
    Models,
    /// Leave the chat.
    Quit,
}

impl Command {
    /// Parses a trimmed prompt line, returning `None` for chat messages.
    pub fn parse(line: &str) -> Option<Self> {
        match line {
            "/reload" => Some(Command::Reload),
            "/models" => Some(Command::Models),
            "/quit" | "/exit" => Some(Command::Quit),
            _ => None,
        }
    }
}
