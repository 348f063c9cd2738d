//! Template facade that ties loader, parser and model together.

use crate::config::LoaderOptions;
use crate::error::{Result, TemplaterError};
use crate::loader::ContentLoader;
use crate::model::{
    Condition, FieldFormat, ListTemplate, MessageSpec, Region, Server, TemplateModel,
};
use crate::parser::{AttributeCase, ParseObserver, TemplateParser, TracingObserver};

/// Options for a [`Templater`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplaterOptions {
    /// Loader settings for remote sources.
    pub loader: LoaderOptions,

    /// Which attribute-name spellings are recognised.
    pub attribute_case: AttributeCase,
}

/// Loads mail templates and owns the resulting model.
///
/// Every collection exists (empty) from construction. Each load appends to
/// what is already there; nothing is reset between loads.
///
/// # Example
///
/// ```
/// use mail_templater::Templater;
///
/// let mut templater = Templater::new();
/// templater
///     .load_template_from_text(
///         r#"<MESSAGE PRIORITY="High">
///              <FROM NAME="Shop" EMAIL="shop@example.com"/>
///              <TO EMAIL="customer@example.com"/>
///              <SUBJECT>Your order</SUBJECT>
///            </MESSAGE>"#,
///     )
///     .unwrap();
///
/// assert_eq!(templater.message().subject, "Your order");
/// assert_eq!(templater.message().to.len(), 1);
/// assert!(templater.regions().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct Templater {
    model: TemplateModel,
    loader: ContentLoader,
    parser: TemplateParser,
}

impl Templater {
    /// Create an empty templater with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty templater with explicit options.
    #[must_use]
    pub fn with_options(options: TemplaterOptions) -> Self {
        Self {
            model: TemplateModel::new(),
            loader: ContentLoader::with_options(options.loader),
            parser: TemplateParser::new().with_attribute_case(options.attribute_case),
        }
    }

    /// Create a templater and load `source` into it.
    ///
    /// # Errors
    /// See [`Templater::load_template`].
    pub fn from_source(source: &str) -> Result<Self> {
        let mut templater = Self::new();
        templater.load_template(source)?;
        Ok(templater)
    }

    /// Load a template from a local path, `file://` path or HTTP(S) URL.
    ///
    /// # Errors
    /// * `SourceUnavailable` if the source cannot be read
    /// * `EmptyTemplate` if the source has no content
    /// * `MalformedTemplate` / `InvalidFieldValue` from parsing
    pub fn load_template(&mut self, source: &str) -> Result<()> {
        tracing::info!(source, "Loading template");
        let content = self.loader.load(source)?;
        tracing::debug!(source, bytes = content.len(), "Template loaded");

        if content.is_empty() {
            return Err(TemplaterError::EmptyTemplate);
        }
        self.parse(&content, &TracingObserver)
    }

    /// Load a template from a string, skipping the loader.
    ///
    /// # Errors
    /// `EmptyTemplate`, `MalformedTemplate` or `InvalidFieldValue`.
    pub fn load_template_from_text(&mut self, text: &str) -> Result<()> {
        tracing::debug!(bytes = text.len(), "Loading template from text");
        self.parse(text, &TracingObserver)
    }

    /// Load a template from a string, reporting parse events to `observer`.
    ///
    /// # Errors
    /// As [`Templater::load_template_from_text`].
    pub fn load_template_observed(&mut self, text: &str, observer: &dyn ParseObserver) -> Result<()> {
        self.parse(text, observer)
    }

    fn parse(&mut self, text: &str, observer: &dyn ParseObserver) -> Result<()> {
        let result = self.parser.parse_observed(text, &mut self.model, observer);
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Template parsing failed, model may be partially populated");
        }
        result
    }

    pub fn model(&self) -> &TemplateModel {
        &self.model
    }

    /// Take ownership of the populated model.
    #[must_use]
    pub fn into_model(self) -> TemplateModel {
        self.model
    }

    pub fn message(&self) -> &MessageSpec {
        &self.model.message
    }

    pub fn message_mut(&mut self) -> &mut MessageSpec {
        &mut self.model.message
    }

    pub fn field_formats(&self) -> &[FieldFormat] {
        &self.model.field_formats
    }

    pub fn field_formats_mut(&mut self) -> &mut Vec<FieldFormat> {
        &mut self.model.field_formats
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.model.conditions
    }

    pub fn conditions_mut(&mut self) -> &mut Vec<Condition> {
        &mut self.model.conditions
    }

    pub fn regions(&self) -> &[Region] {
        &self.model.regions
    }

    pub fn regions_mut(&mut self) -> &mut Vec<Region> {
        &mut self.model.regions
    }

    pub fn smtp_servers(&self) -> &[Server] {
        &self.model.smtp_servers
    }

    pub fn smtp_servers_mut(&mut self) -> &mut Vec<Server> {
        &mut self.model.smtp_servers
    }

    pub fn list_templates(&self) -> &[ListTemplate] {
        &self.model.list_templates
    }

    pub fn list_templates_mut(&mut self) -> &mut Vec<ListTemplate> {
        &mut self.model.list_templates
    }

    /// First field format with the given name.
    pub fn field_format(&self, name: &str) -> Option<&FieldFormat> {
        self.model.field_formats.iter().find(|f| f.name == name)
    }

    /// First region with the given id.
    pub fn region(&self, region_id: &str) -> Option<&Region> {
        self.model.regions.iter().find(|r| r.region_id == region_id)
    }

    /// First list template with the given name.
    pub fn list_template(&self, name: &str) -> Option<&ListTemplate> {
        self.model.list_templates.iter().find(|t| t.name == name)
    }

    /// All conditions attached to a region, in document order.
    pub fn conditions_for<'a>(&'a self, region_id: &'a str) -> impl Iterator<Item = &'a Condition> + 'a {
        self.model
            .conditions
            .iter()
            .filter(move |c| c.region_id == region_id)
    }
}
