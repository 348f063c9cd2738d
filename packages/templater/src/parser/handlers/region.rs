//! Handlers for conditional content: regions, conditions and list templates.

use crate::error::Result;
use crate::model::{Condition, ListTemplate, Operator, Region};
use crate::parser::handler::{ContentMode, ElementHandler, ParseContext, StartElement};

/// Handler for `<CONDITION>`: appends a condition.
pub struct ConditionHandler;

impl ElementHandler for ConditionHandler {
    fn handle(&self, element: &StartElement, context: &mut ParseContext<'_>) -> Result<()> {
        let attrs = element.attributes();
        let mut condition = Condition::default();

        if let Some(region_id) = attrs.text("REGIONID") {
            condition.region_id = region_id;
        }
        if let Some(operator) = attrs.parse::<Operator>("OPERATOR", "a comparison operator")? {
            condition.operator = operator;
        }
        if let Some(null_text) = attrs.text("NULLTEXT") {
            condition.null_text = null_text;
        }
        if let Some(field) = attrs.text("FIELD") {
            condition.field = field;
        }
        if let Some(value) = attrs.text("VALUE") {
            condition.value = value;
        }
        if let Some(case_sensitive) = attrs.flag("CASESENSITIVE")? {
            condition.case_sensitive = case_sensitive;
        }

        context.model.conditions.push(condition);
        Ok(())
    }
}

/// Handler for `<REGION>`: appends a region.
pub struct RegionHandler;

impl ElementHandler for RegionHandler {
    fn handle(&self, element: &StartElement, context: &mut ParseContext<'_>) -> Result<()> {
        let attrs = element.attributes();
        context.model.regions.push(Region {
            region_id: attrs.text("REGIONID").unwrap_or_default(),
            null_text: attrs.text("NULLTEXT").unwrap_or_default(),
            url: attrs.text("URL"),
        });
        Ok(())
    }
}

/// Handler for `<LISTTEMPLATE>`.
///
/// The element's inner source becomes the template body verbatim, so the
/// engine does not dispatch its content. Unnamed list templates are dropped.
pub struct ListTemplateHandler;

impl ElementHandler for ListTemplateHandler {
    fn content_mode(&self) -> ContentMode {
        ContentMode::Consume
    }

    fn handle(&self, element: &StartElement, context: &mut ParseContext<'_>) -> Result<()> {
        let attrs = element.attributes();
        let region_id = attrs.text("REGIONID");
        let null_text = attrs.text("NULLTEXT");

        let Some(name) = attrs.text("NAME") else {
            context
                .observer
                .on_ignored(element.key(), "list template has no NAME");
            return Ok(());
        };

        context.model.list_templates.push(ListTemplate {
            name,
            region_id,
            null_text,
            body: element.text_content().to_string(),
        });
        Ok(())
    }
}
