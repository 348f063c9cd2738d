//! Handler for the recipient and sender elements.

use crate::error::Result;
use crate::model::{Address, MessageSpec};
use crate::parser::attributes::Attributes;
use crate::parser::handler::{ElementHandler, ParseContext, StartElement};

/// Message field an address element writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    From,
    To,
    Cc,
    Bcc,
}

/// Handler for `<FROM>`, `<TO>`, `<CC>` and `<BCC>`.
///
/// Elements without attributes are ignored. `FROM` replaces the sender and
/// also carries the reply-to and return-receipt addresses; the others append.
pub struct AddressHandler {
    field: AddressField,
}

impl AddressHandler {
    #[must_use]
    pub fn new(field: AddressField) -> Self {
        Self { field }
    }
}

/// Set reply-to and return-receipt from a `FROM` element's extra attributes.
fn apply_sender_extras(attrs: &Attributes, message: &mut MessageSpec) {
    if let Some(name) = attrs.text("REPLYNAME") {
        message.reply_to.get_or_insert_with(Address::default).name = Some(name);
    }
    if let Some(email) = attrs.text("REPLYEMAIL") {
        message.reply_to.get_or_insert_with(Address::default).email = Some(email);
    }
    if let Some(email) = attrs.text("RECEIPTEMAIL") {
        message
            .return_receipt
            .get_or_insert_with(Address::default)
            .email = Some(email);
    }
}

impl ElementHandler for AddressHandler {
    fn handle(&self, element: &StartElement, context: &mut ParseContext<'_>) -> Result<()> {
        let attrs = element.attributes();
        if !attrs.has_any() {
            context
                .observer
                .on_ignored(element.key(), "address element has no attributes");
            return Ok(());
        }

        let address = Address {
            name: attrs.text("NAME"),
            email: attrs.text("EMAIL"),
        };

        let message = &mut context.model.message;
        match self.field {
            AddressField::From => {
                apply_sender_extras(attrs, message);
                message.from = Some(address);
            }
            AddressField::To => message.to.push(address),
            AddressField::Cc => message.cc.push(address),
            AddressField::Bcc => message.bcc.push(address),
        }
        Ok(())
    }
}
