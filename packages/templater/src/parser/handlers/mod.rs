//! Handlers for the template element vocabulary.

mod address;
mod format;
mod message;
mod region;
mod server;

pub use address::{AddressField, AddressHandler};
pub use format::FieldFormatHandler;
pub use message::MessageHandler;
pub use region::{ConditionHandler, ListTemplateHandler, RegionHandler};
pub use server::SmtpServerHandler;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::error::Result;
    use crate::model::TemplateModel;
    use crate::parser::attributes::AttributeCase;
    use crate::parser::handler::{ContentMode, ElementHandler, ParseContext, StartElement};
    use crate::parser::observer::NoopObserver;
    use crate::xml::{RawElement, TemplateEvent, TemplateReader};

    /// The first start tag of `xml`.
    pub fn first_element(xml: &str) -> RawElement {
        let mut reader = TemplateReader::new(xml);
        loop {
            match reader.next_event().unwrap() {
                TemplateEvent::Open(element) => return element,
                TemplateEvent::Eof => panic!("no element in {xml:?}"),
                _ => {}
            }
        }
    }

    /// Run `handler` on the root element of `xml` against `model`.
    ///
    /// Consuming handlers get the root's leading text, as the engine would
    /// pass it.
    pub fn apply<H: ElementHandler>(handler: &H, xml: &str, model: &mut TemplateModel) -> Result<()> {
        let mut reader = TemplateReader::new(xml);
        let TemplateEvent::Open(raw) = reader.next_event()? else {
            panic!("{xml:?} does not start with an element");
        };
        let mut element = StartElement::new(raw, AttributeCase::default());

        if handler.content_mode() == ContentMode::Consume {
            while let TemplateEvent::Text(text) = reader.next_event()? {
                element.push_content(&text);
            }
        }

        let mut context = ParseContext::new(model, &NoopObserver);
        handler.handle(&element, &mut context)
    }
}
