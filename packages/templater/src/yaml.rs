//! YAML rendering of a loaded template model.

use crate::error::Result;
use crate::model::TemplateModel;

/// Serialise a template model as a YAML document.
///
/// # Examples
/// ```
/// use mail_templater::{yaml::generate_yaml, Templater};
///
/// let mut templater = Templater::new();
/// templater.load_template_from_text("<MESSAGE><SUBJECT>Hi</SUBJECT></MESSAGE>").unwrap();
///
/// let yaml = generate_yaml(templater.model()).unwrap();
/// assert!(yaml.starts_with("---\n"));
/// assert!(yaml.contains("subject: Hi"));
/// ```
pub fn generate_yaml(model: &TemplateModel) -> Result<String> {
    let body = serde_yaml_ng::to_string(model)?;
    Ok(format!("---\n{body}"))
}
