//! Text-routing state carried between parser events.

use crate::model::MessageSpec;

/// Where incoming text events are routed.
///
/// Set on every start-element and reset to `Idle` on every end-element, so
/// text between elements is dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParserState {
    #[default]
    Idle,
    InSubject,
    InBodyHtml,
    InBodyText,
    InOther,
}

impl ParserState {
    /// State entered when an element with dispatch key `key` opens.
    #[must_use]
    pub fn for_element(key: &str) -> Self {
        match key {
            "SUBJECT" => Self::InSubject,
            "BODYHTML" => Self::InBodyHtml,
            "BODYTEXT" => Self::InBodyText,
            _ => Self::InOther,
        }
    }

    /// The message field text is appended to in this state, if any.
    pub fn text_target<'m>(&self, message: &'m mut MessageSpec) -> Option<&'m mut String> {
        match self {
            Self::InSubject => Some(&mut message.subject),
            Self::InBodyHtml => Some(&mut message.body_html),
            Self::InBodyText => Some(&mut message.body_text),
            Self::Idle | Self::InOther => None,
        }
    }
}
