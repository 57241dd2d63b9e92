/// A key reported by the input field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// The primary submit key.
    Enter,
    /// A printable character.
    Char(char),
    /// Anything else.
    Other,
}

/// A key press in the input field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyPress {
    /// The pressed key.
    pub key: Key,
    /// Whether Shift was held, which turns Enter into a newline request.
    pub shift: bool,
}

impl KeyPress {
    /// A plain Enter press.
    #[inline]
    pub fn enter() -> Self {
        Self {
            key: Key::Enter,
            shift: false,
        }
    }

    /// An Enter press with Shift held.
    #[inline]
    pub fn shift_enter() -> Self {
        Self {
            key: Key::Enter,
            shift: true,
        }
    }

    #[inline]
    pub(crate) fn requests_submit(&self) -> bool {
        self.key == Key::Enter && !self.shift
    }
}

/// Input events the widget subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WidgetEvent {
    /// The send control was activated.
    SendActivated,
    /// A key was pressed in the input field.
    KeyPressed(KeyPress),
}

/// Tells the host whether to run the default action of an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Propagation {
    /// The host should proceed with its default action.
    Continue,
    /// The widget consumed the event, e.g. the newline of a submitting Enter.
    PreventDefault,
}
