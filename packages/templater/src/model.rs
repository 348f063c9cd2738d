//! Template model: the records a template document is mapped onto.
//!
//! Rendering, delivery and address validation consume these types; nothing
//! here interprets the values beyond parsing them.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::config::DEFAULT_SMTP_PORT;

/// Delivery priority of a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

impl Priority {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Normal => "Normal",
            Self::High => "High",
        }
    }
}

impl FromStr for Priority {
    type Err = ();

    /// Parse a priority name (any case) or an X-Priority numeral.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "5" => Ok(Self::Low),
            "normal" | "3" => Ok(Self::Normal),
            "high" | "1" => Ok(Self::High),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mailbox: display name and email, both unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Address {
    /// Create an address from a name and an email.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, &self.email) {
            (Some(name), Some(email)) => write!(f, "\"{name}\" <{email}>"),
            (None, Some(email)) => write!(f, "<{email}>"),
            (Some(name), None) => write!(f, "\"{name}\""),
            (None, None) => Ok(()),
        }
    }
}

/// The outbound message described by a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageSpec {
    pub priority: Priority,

    /// Sender; each FROM element replaces the previous one.
    pub from: Option<Address>,

    pub to: Vec<Address>,
    pub cc: Vec<Address>,
    pub bcc: Vec<Address>,

    /// Subject text, accumulated across text events.
    pub subject: String,

    /// HTML body text, accumulated across text events.
    pub body_html: String,

    /// Plain-text body, accumulated across text events.
    pub body_text: String,

    pub reply_to: Option<Address>,
    pub return_receipt: Option<Address>,
}

/// Side on which a formatted value is padded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum PaddingDirection {
    Left,
    #[default]
    Right,
}

impl PaddingDirection {
    /// `LEFT` in any case is `Left`; everything else is `Right`.
    #[must_use]
    pub fn from_attribute(value: &str) -> Self {
        if value.eq_ignore_ascii_case("left") {
            Self::Left
        } else {
            Self::Right
        }
    }
}

/// A named formatting rule applied to a field value when rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldFormat {
    pub name: String,
    pub format: String,
    pub padding_direction: PaddingDirection,
    pub total_width: i16,
    pub padding_char: char,
}

impl Default for FieldFormat {
    fn default() -> Self {
        Self {
            name: String::new(),
            format: String::new(),
            padding_direction: PaddingDirection::Right,
            total_width: 0,
            padding_char: ' ',
        }
    }
}

/// Comparison applied by a condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Operator {
    #[default]
    Equal,
    NotEqual,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
}

impl FromStr for Operator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s.trim().to_ascii_lowercase().as_str() {
            "equal" | "equals" | "eq" | "=" | "==" => Self::Equal,
            "notequal" | "notequals" | "ne" | "!=" | "<>" => Self::NotEqual,
            "contains" => Self::Contains,
            "notcontains" => Self::NotContains,
            "startswith" => Self::StartsWith,
            "endswith" => Self::EndsWith,
            "greaterthan" | "greater" | "gt" | ">" => Self::GreaterThan,
            "lessthan" | "less" | "lt" | "<" => Self::LessThan,
            "greaterorequal" | "greaterthanorequal" | "ge" | ">=" => Self::GreaterOrEqual,
            "lessorequal" | "lessthanorequal" | "le" | "<=" => Self::LessOrEqual,
            _ => return Err(()),
        };
        Ok(op)
    }
}

/// A rule comparing a field against a value to decide whether a region renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub region_id: String,
    pub operator: Operator,
    pub null_text: String,
    pub field: String,
    pub value: String,
    pub case_sensitive: bool,
}

/// A named placeholder whose content is conditionally included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Region {
    pub region_id: String,
    pub null_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A named, repeatable fragment bound to a data region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListTemplate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub null_text: Option<String>,
    /// Inner source of the element, verbatim.
    pub body: String,
}

impl ListTemplate {
    #[must_use]
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
            ..Self::default()
        }
    }
}

/// Outgoing mail server credentials.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_SMTP_PORT,
            username: None,
            password: None,
        }
    }
}

impl fmt::Debug for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Server")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Everything a template document populates.
///
/// All collections exist (empty) from construction and only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemplateModel {
    pub message: MessageSpec,
    pub field_formats: Vec<FieldFormat>,
    pub conditions: Vec<Condition>,
    pub regions: Vec<Region>,
    pub smtp_servers: Vec<Server>,
    pub list_templates: Vec<ListTemplate>,
}

impl TemplateModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
