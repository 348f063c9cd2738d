//! Element handler trait definition.

use std::fmt;

use super::attributes::{AttributeCase, Attributes};
use super::observer::ParseObserver;
use crate::error::Result;
use crate::model::TemplateModel;
use crate::xml::{dispatch_key, RawElement};

/// How the engine treats the content of a handled element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    /// Children and text flow through the engine as usual.
    Dispatch,
    /// The handler runs once the element's leading text has been read and
    /// receives it through [`StartElement::text_content`]. The rest of the
    /// subtree is not dispatched.
    Consume,
}

/// A start-element event as seen by a handler.
#[derive(Debug, Clone)]
pub struct StartElement {
    key: String,
    attributes: Attributes,
    content: String,
}

impl StartElement {
    /// Build the event for `element`, resolving attributes under `case`.
    pub fn new(element: RawElement, case: AttributeCase) -> Self {
        let key = dispatch_key(&element.name);
        let attributes = Attributes::new(element.attributes, key.clone(), case);
        Self {
            key,
            attributes,
            content: String::new(),
        }
    }

    /// Upper-cased local name.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Decoded text and CDATA up to the first child element or the end tag.
    ///
    /// Only collected for [`ContentMode::Consume`] handlers; empty otherwise.
    pub fn text_content(&self) -> &str {
        &self.content
    }

    pub(crate) fn push_content(&mut self, text: &str) {
        self.content.push_str(text);
    }
}

/// Context passed to handlers.
pub struct ParseContext<'m> {
    /// Model being populated.
    pub model: &'m mut TemplateModel,

    /// Diagnostics sink.
    pub observer: &'m dyn ParseObserver,
}

impl<'m> ParseContext<'m> {
    pub fn new(model: &'m mut TemplateModel, observer: &'m dyn ParseObserver) -> Self {
        Self { model, observer }
    }
}

impl fmt::Debug for ParseContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseContext")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// Trait for element handlers.
///
/// Handlers map one element of the template vocabulary onto the model.
pub trait ElementHandler: Send + Sync {
    /// How the engine should treat this element's content.
    ///
    /// Default implementation lets content flow through the engine.
    fn content_mode(&self) -> ContentMode {
        ContentMode::Dispatch
    }

    /// Apply the element to the model.
    ///
    /// # Errors
    /// `InvalidFieldValue` when an attribute cannot be converted.
    fn handle(&self, element: &StartElement, context: &mut ParseContext<'_>) -> Result<()>;
}
