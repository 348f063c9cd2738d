//! Handler for `<FIELDFORMAT>` elements.

use crate::error::Result;
use crate::model::{FieldFormat, PaddingDirection};
use crate::parser::handler::{ElementHandler, ParseContext, StartElement};

/// Handler for `<FIELDFORMAT>`.
///
/// Always appends a format, even when no attribute is present.
pub struct FieldFormatHandler;

impl ElementHandler for FieldFormatHandler {
    fn handle(&self, element: &StartElement, context: &mut ParseContext<'_>) -> Result<()> {
        let attrs = element.attributes();
        let mut format = FieldFormat::default();

        if let Some(name) = attrs.text("NAME") {
            format.name = name;
        }
        if let Some(pattern) = attrs.text("FORMAT") {
            format.format = pattern;
        }
        if let Some(direction) = attrs.get("PADDINGDIR") {
            format.padding_direction = PaddingDirection::from_attribute(direction);
        }
        if let Some(width) = attrs.parse::<i16>("TOTALWIDTH", "a 16-bit integer")? {
            format.total_width = width;
        }
        if let Some(pad) = attrs.first_char("PADDINGCHAR") {
            format.padding_char = pad;
        }

        context.model.field_formats.push(format);
        Ok(())
    }
}
