//! Mail Templater - Load XML mail templates into an outbound-message model.
//!
//! A template document describes one outbound message: sender and
//! recipients, subject and bodies, field formatting rules, conditional
//! regions, repeatable list fragments and outgoing SMTP servers. This crate
//! reads such a document from a file or URL and maps it onto typed records.
//! Rendering and delivery are left to the caller.
//!
//! # Example
//!
//! ```
//! use mail_templater::{Priority, Templater};
//!
//! let mut templater = Templater::new();
//! templater
//!     .load_template_from_text(
//!         r#"<MESSAGE PRIORITY="Low">
//!              <TO NAME="Ann" EMAIL="ann@example.com"/>
//!              <SUBJECT>Fish &amp; Chips</SUBJECT>
//!              <SMTPSERVER SERVER="smtp.example.com" PORT="587"/>
//!            </MESSAGE>"#,
//!     )
//!     .unwrap();
//!
//! assert_eq!(templater.message().priority, Priority::Low);
//! assert_eq!(templater.message().subject, "Fish & Chips");
//! assert_eq!(templater.smtp_servers()[0].port, 587);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants and source addressing
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client for remote templates
//! - [`loader`]: Template source loading
//! - [`model`]: Template model types
//! - [`xml`]: Streaming XML reader
//! - [`parser`]: Registry-driven template parser
//! - [`templater`]: Facade owning the model
//! - [`yaml`]: YAML output of a loaded model
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod loader;
pub mod model;
pub mod parser;
pub mod templater;
pub mod xml;
pub mod yaml;

// Re-export commonly used items
pub use error::{Result, TemplaterError};
pub use loader::{load_content, ContentLoader, TemplateSource};
pub use model::{
    Address, Condition, FieldFormat, ListTemplate, MessageSpec, Operator, PaddingDirection,
    Priority, Region, Server, TemplateModel,
};
pub use parser::{AttributeCase, ParseObserver, TemplateParser};
pub use templater::{Templater, TemplaterOptions};
