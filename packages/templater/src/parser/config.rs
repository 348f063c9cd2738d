//! Registry configuration for the template vocabulary.

use super::core::ElementRegistry;
use super::handlers::{
    AddressField, AddressHandler, ConditionHandler, FieldFormatHandler, ListTemplateHandler,
    MessageHandler, RegionHandler, SmtpServerHandler,
};

/// Create a registry configured for mail template documents.
///
/// `SUBJECT`, `BODYHTML` and `BODYTEXT` have no handler: their text is
/// routed by the parser state instead.
#[must_use]
pub fn create_template_registry() -> ElementRegistry {
    let mut registry = ElementRegistry::new();

    registry.register("MESSAGE", MessageHandler);

    // Sender and recipients
    registry.register("FROM", AddressHandler::new(AddressField::From));
    registry.register("TO", AddressHandler::new(AddressField::To));
    registry.register("CC", AddressHandler::new(AddressField::Cc));
    registry.register("BCC", AddressHandler::new(AddressField::Bcc));

    registry.register("FIELDFORMAT", FieldFormatHandler);

    // Conditional content
    registry.register("CONDITION", ConditionHandler);
    registry.register("REGION", RegionHandler);
    registry.register("LISTTEMPLATE", ListTemplateHandler);

    registry.register("SMTPSERVER", SmtpServerHandler);

    registry
}
