/// High-level events with element targeting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Mouse click on an element
    Click { target: String },
    /// Checkbox toggled; `checked` is the state after the change
    Change { target: String, checked: bool },
    /// Key released inside a text input; `value` is the input's current text
    KeyUp { target: String, value: String },
    /// Option chosen in a select element
    Select { target: String, value: String },
}

impl Event {
    pub fn click(target: impl Into<String>) -> Self {
        Self::Click {
            target: target.into(),
        }
    }

    pub fn change(target: impl Into<String>, checked: bool) -> Self {
        Self::Change {
            target: target.into(),
            checked,
        }
    }

    pub fn key_up(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self::KeyUp {
            target: target.into(),
            value: value.into(),
        }
    }

    pub fn select(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Select {
            target: target.into(),
            value: value.into(),
        }
    }

    /// ID of the element the event is aimed at.
    pub fn target(&self) -> &str {
        match self {
            Self::Click { target }
            | Self::Change { target, .. }
            | Self::KeyUp { target, .. }
            | Self::Select { target, .. } => target,
        }
    }
}
