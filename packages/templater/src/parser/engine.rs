//! Parse engine that walks template events and dispatches elements.

use super::attributes::AttributeCase;
use super::config::create_template_registry;
use super::core::ElementRegistry;
use super::handler::{ContentMode, ElementHandler, ParseContext, StartElement};
use super::observer::{NoopObserver, ParseObserver};
use super::state::ParserState;
use crate::error::{Result, TemplaterError};
use crate::model::TemplateModel;
use crate::xml::{dispatch_key, TemplateEvent, TemplateReader};

/// Single forward pass from template text to model mutations.
///
/// The engine consumes start-element, text and end-element events in
/// document order and never builds a tree. Between events it keeps the
/// text-routing [`ParserState`], a consuming handler still waiting for its
/// leading text, and the depth of a subtree being skipped.
#[derive(Debug)]
pub struct TemplateParser {
    registry: ElementRegistry,
    attribute_case: AttributeCase,
}

impl TemplateParser {
    /// Create a parser for the standard template vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(create_template_registry())
    }

    /// Create a parser with a custom registry.
    #[must_use]
    pub fn with_registry(registry: ElementRegistry) -> Self {
        Self {
            registry,
            attribute_case: AttributeCase::default(),
        }
    }

    /// Set the attribute-name case policy.
    #[must_use]
    pub fn with_attribute_case(mut self, case: AttributeCase) -> Self {
        self.attribute_case = case;
        self
    }

    /// Get a reference to the underlying registry.
    #[must_use]
    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    #[must_use]
    pub fn attribute_case(&self) -> AttributeCase {
        self.attribute_case
    }

    /// Parse `text` into `model` without diagnostics.
    ///
    /// # Errors
    /// See [`TemplateParser::parse_observed`].
    pub fn parse(&self, text: &str, model: &mut TemplateModel) -> Result<()> {
        self.parse_observed(text, model, &NoopObserver)
    }

    /// Parse `text` into `model`, reporting progress to `observer`.
    ///
    /// Elements handled before a failure stay applied to the model.
    ///
    /// # Errors
    /// * `EmptyTemplate` if `text` is empty
    /// * `MalformedTemplate` if `text` is not well-formed XML
    /// * `InvalidFieldValue` if an attribute cannot be converted
    pub fn parse_observed(
        &self,
        text: &str,
        model: &mut TemplateModel,
        observer: &dyn ParseObserver,
    ) -> Result<()> {
        if text.is_empty() {
            return Err(TemplaterError::EmptyTemplate);
        }

        let mut reader = TemplateReader::new(text);
        let mut context = ParseContext::new(model, observer);
        let mut state = ParserState::Idle;
        let mut pending: Option<(StartElement, &dyn ElementHandler)> = None;
        let mut skip_depth = 0usize;

        loop {
            match reader.next_event()? {
                TemplateEvent::Eof => break,
                TemplateEvent::Open(raw) => {
                    if let Some((element, handler)) = pending.take() {
                        // A child element ends the consumed element's leading text.
                        handler.handle(&element, &mut context)?;
                        skip_depth = 2;
                        continue;
                    }
                    if skip_depth > 0 {
                        skip_depth += 1;
                        continue;
                    }

                    let key = dispatch_key(&raw.name);
                    state = ParserState::for_element(&key);

                    let Some(handler) = self.registry.get_handler(&key) else {
                        observer.on_unhandled(&key);
                        continue;
                    };

                    observer.on_element(&key);
                    let element = StartElement::new(raw, self.attribute_case);
                    match handler.content_mode() {
                        ContentMode::Dispatch => handler.handle(&element, &mut context)?,
                        ContentMode::Consume => pending = Some((element, handler)),
                    }
                }
                TemplateEvent::Text(text) => {
                    if let Some((element, _)) = pending.as_mut() {
                        element.push_content(&text);
                        continue;
                    }
                    if skip_depth > 0 {
                        continue;
                    }
                    if let Some(target) = state.text_target(&mut context.model.message) {
                        target.push_str(&text);
                        observer.on_text(state, &text);
                    }
                }
                TemplateEvent::Close => {
                    if let Some((element, handler)) = pending.take() {
                        handler.handle(&element, &mut context)?;
                    } else if skip_depth > 0 {
                        skip_depth -= 1;
                        if skip_depth > 0 {
                            continue;
                        }
                    }
                    state = ParserState::Idle;
                }
            }
        }

        Ok(())
    }
}

impl Default for TemplateParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::model::{Address, Priority};
    
    fn parse(xml: &str) -> Result<TemplateModel> {
        let mut model = TemplateModel::new();
        TemplateParser::new().parse(xml, &mut model)?;
        Ok(model)
    }

    #[test]
    fn test_empty_text() {
        assert!(matches!(parse(""), Err(TemplaterError::EmptyTemplate)));
    }

    #[test]
    fn test_malformed_text() {
        assert!(matches!(
            parse("<MESSAGE><SUBJECT>Hi</MESSAGE>"),
            Err(TemplaterError::MalformedTemplate { .. })
        ));
    }

    #[test]
    fn test_malformed_text_keeps_elements_before_fault() {
        let mut model = TemplateModel::new();
        let result = TemplateParser::new().parse(
            r#"<MESSAGE><TO EMAIL="a@x.org"/><SUBJECT>x</MESSAGE>"#,
            &mut model,
        );

        assert!(matches!(result, Err(TemplaterError::MalformedTemplate { .. })));
        assert_eq!(model.message.to.len(), 1);
        assert_eq!(model.message.subject, "x");
    }

    #[test]
    fn test_subject_entity_concatenation() {
        let model = parse("<MESSAGE><SUBJECT>A&amp;B</SUBJECT></MESSAGE>").unwrap();
        assert_eq!(model.message.subject, "A&B");
    }

    #[test]
    fn test_bodies_accumulate() {
        let xml = "<MESSAGE>\
            <BODYHTML>&lt;p&gt;Hi<![CDATA[ <b>there</b>]]></BODYHTML>\
            <BODYTEXT>Hi</BODYTEXT>\
            <BODYTEXT> again</BODYTEXT>\
        </MESSAGE>";
        let model = parse(xml).unwrap();
        assert_eq!(model.message.body_html, "<p>Hi <b>there</b>");
        assert_eq!(model.message.body_text, "Hi again");
    }

    #[test]
    fn test_element_names_any_case() {
        let model = parse(r#"<message priority="High"><subject>Hello</subject><To email="a@b.c"/></message>"#)
            .unwrap();
        assert_eq!(model.message.priority, Priority::High);
        assert_eq!(model.message.subject, "Hello");
        assert_eq!(model.message.to.len(), 1);
    }

    #[test]
    fn test_text_after_nested_element_dropped() {
        let model = parse("<MESSAGE><SUBJECT>Keep<X/>Drop</SUBJECT>Stray</MESSAGE>").unwrap();
        assert_eq!(model.message.subject, "Keep");
    }

    #[test]
    fn test_unknown_elements_ignored() {
        let model = parse("<MESSAGE><FOOTER>text</FOOTER><TO EMAIL=\"a@b.c\"/></MESSAGE>").unwrap();
        assert_eq!(model.message.to, vec![Address {
            name: None,
            email: Some("a@b.c".to_string())
        }]);
    }

    #[test]
    fn test_list_template_content_not_dispatched() {
        let xml = r#"<MESSAGE>
            <LISTTEMPLATE NAME="rows">lead<TO EMAIL="inner@x.org"/><SUBJECT>inner</SUBJECT>tail</LISTTEMPLATE>
            <LISTTEMPLATE><SUBJECT>unnamed</SUBJECT></LISTTEMPLATE>
            <SUBJECT>outer</SUBJECT>
        </MESSAGE>"#;
        let model = parse(xml).unwrap();

        assert!(model.message.to.is_empty());
        assert_eq!(model.message.subject, "outer");
        assert_eq!(model.list_templates.len(), 1);
        assert_eq!(model.list_templates[0].body, "lead");
    }

    #[test]
    fn test_list_template_body_decoded() {
        let xml = "<MESSAGE>\
            <LISTTEMPLATE NAME=\"rows\"><![CDATA[<tr>$A$</tr>]]></LISTTEMPLATE>\
            <LISTTEMPLATE NAME=\"escaped\">Fish &amp; &lt;b&gt;$A$&lt;/b&gt;</LISTTEMPLATE>\
            <LISTTEMPLATE NAME=\"empty\"/>\
        </MESSAGE>";
        let model = parse(xml).unwrap();

        let bodies: Vec<_> = model.list_templates.iter().map(|t| t.body.as_str()).collect();
        assert_eq!(bodies, vec!["<tr>$A$</tr>", "Fish & <b>$A$</b>", ""]);
    }

    #[test]
    fn test_error_leaves_earlier_elements_applied() {
        let xml = r#"<MESSAGE>
            <TO EMAIL="first@x.org"/>
            <FIELDFORMAT TOTALWIDTH="abc"/>
            <TO EMAIL="second@x.org"/>
        </MESSAGE>"#;
        let mut model = TemplateModel::new();
        let result = TemplateParser::new().parse(xml, &mut model);

        assert!(matches!(result, Err(TemplaterError::InvalidFieldValue { .. })));
        assert_eq!(model.message.to.len(), 1);
        assert!(model.field_formats.is_empty());
    }

    #[test]
    fn test_insensitive_attribute_case() {
        let mut model = TemplateModel::new();
        TemplateParser::new()
            .with_attribute_case(AttributeCase::Insensitive)
            .parse(r#"<REGION RegionId="x"/>"#, &mut model)
            .unwrap();
        assert_eq!(model.regions[0].region_id, "x");
    }

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<String>>,
    }

    impl ParseObserver for Recorder {
        fn on_element(&self, key: &str) {
            self.events.borrow_mut().push(format!("element:{key}"));
        }

        fn on_unhandled(&self, key: &str) {
            self.events.borrow_mut().push(format!("unhandled:{key}"));
        }

        fn on_ignored(&self, key: &str, _reason: &str) {
            self.events.borrow_mut().push(format!("ignored:{key}"));
        }

        fn on_text(&self, target: ParserState, text: &str) {
            self.events.borrow_mut().push(format!("text:{target:?}:{text}"));
        }
    }

    #[test]
    fn test_observer_receives_events() {
        let recorder = Recorder::default();
        let mut model = TemplateModel::new();
        TemplateParser::new()
            .parse_observed(
                r#"<MESSAGE><SUBJECT>Hi</SUBJECT><LISTTEMPLATE>x</LISTTEMPLATE></MESSAGE>"#,
                &mut model,
                &recorder,
            )
            .unwrap();

        assert_eq!(
            recorder.events.into_inner(),
            vec![
                "element:MESSAGE",
                "unhandled:SUBJECT",
                "text:InSubject:Hi",
                "element:LISTTEMPLATE",
                "ignored:LISTTEMPLATE",
            ]
        );
    }

    struct CountingHandler;

    impl ElementHandler for CountingHandler {
        fn handle(&self, _element: &StartElement, context: &mut ParseContext<'_>) -> Result<()> {
            context.model.message.subject.push('#');
            Ok(())
        }
    }

    #[test]
    fn test_custom_registry() {
        let mut registry = ElementRegistry::new();
        registry.register("tick", CountingHandler);
        let parser = TemplateParser::with_registry(registry);

        let mut model = TemplateModel::new();
        parser
            .parse("<root><TICK/><tick/><TO EMAIL=\"a@b.c\"/></root>", &mut model)
            .unwrap();

        assert_eq!(model.message.subject, "##");
        assert!(model.message.to.is_empty());
    }
}
