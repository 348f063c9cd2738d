//! Template parser: maps XML template documents onto the template model.
//!
//! Elements are dispatched through a registry keyed by upper-cased local
//! name, so the vocabulary can be extended or replaced in tests.

mod attributes;
mod config;
mod core;
mod engine;
mod handler;
pub mod handlers;
mod observer;
mod state;

pub use attributes::{AttributeCase, Attributes};
pub use config::create_template_registry;
pub use self::core::ElementRegistry;
pub use engine::TemplateParser;
pub use handler::{ContentMode, ElementHandler, ParseContext, StartElement};
pub use observer::{NoopObserver, ParseObserver, TracingObserver};
pub use state::ParserState;
