//! Element registry for mapping dispatch keys to handlers.

use std::collections::{HashMap, HashSet};

use super::handler::ElementHandler;

/// Registry mapping element names to handlers.
///
/// Names are upper-cased on registration and lookup, so `"listTemplate"`
/// and `"LISTTEMPLATE"` address the same entry.
pub struct ElementRegistry {
    handlers: HashMap<String, Box<dyn ElementHandler>>,
}

impl ElementRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler for an element name, replacing any previous one.
    pub fn register(&mut self, tag_name: &str, handler: impl ElementHandler + 'static) {
        self.handlers
            .insert(tag_name.to_ascii_uppercase(), Box::new(handler));
    }

    /// Get the handler for an element name.
    pub fn get_handler(&self, tag_name: &str) -> Option<&dyn ElementHandler> {
        self.handlers
            .get(tag_name.to_ascii_uppercase().as_str())
            .map(|h| h.as_ref())
    }

    /// Check if a handler is registered for an element name.
    #[must_use]
    pub fn has_handler(&self, tag_name: &str) -> bool {
        self.get_handler(tag_name).is_some()
    }

    /// Return set of all registered (upper-cased) element names.
    #[must_use]
    pub fn registered_tags(&self) -> HashSet<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for ElementRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ElementRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tags: Vec<_> = self.handlers.keys().collect();
        tags.sort();
        f.debug_struct("ElementRegistry").field("tags", &tags).finish()
    }
}
