//! Handler for the `<MESSAGE>` root element.

use crate::error::Result;
use crate::model::Priority;
use crate::parser::handler::{ElementHandler, ParseContext, StartElement};

/// Handler for `<MESSAGE>`: reads the delivery priority.
pub struct MessageHandler;

impl ElementHandler for MessageHandler {
    fn handle(&self, element: &StartElement, context: &mut ParseContext<'_>) -> Result<()> {
        if let Some(priority) = element
            .attributes()
            .parse::<Priority>("PRIORITY", "Low, Normal or High")?
        {
            context.model.message.priority = priority;
        }
        Ok(())
    }
}
