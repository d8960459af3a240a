//! Reader registry - maps type hints to reader factories.
//!
//! The first segment of a delegated path names a *kind* of child level
//! ("users", "attachments", ...). The registry turns that hint into a
//! fresh, unopened reader; the router then opens it with the concrete
//! child identity. Registration is the integration point for custom
//! level kinds - anything implementing [`Reader`] can be plugged in.

use std::collections::HashMap;

use crate::error::RouteError;
use crate::router::Reader;

/// Factory producing a fresh, unopened reader.
pub type ReaderFactory = dyn Fn() -> Box<dyn Reader>;

/// Registry of reader factories keyed by type hint.
#[derive(Default)]
pub struct Registry {
    factories: HashMap<String, Box<ReaderFactory>>,
}

impl Registry {
    /// Empty registry. Every hint is unknown until registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for a type hint, replacing any previous one.
    pub fn register<F>(&mut self, hint: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Reader> + 'static,
    {
        self.factories.insert(hint.into(), Box::new(factory));
    }

    /// Resolve a hint into a new reader instance.
    ///
    /// An unknown hint is fatal for the entry being routed: it means the
    /// archive references a level kind this configuration cannot read.
    pub fn resolve(&self, hint: &str) -> Result<Box<dyn Reader>, RouteError> {
        match self.factories.get(hint) {
            Some(factory) => Ok(factory()),
            None => Err(RouteError::UnknownHint { hint: hint.to_string() }),
        }
    }

    /// Whether a hint has a registered factory.
    pub fn contains(&self, hint: &str) -> bool {
        self.factories.contains_key(hint)
    }

    /// Registered hints, in no particular order.
    pub fn hints(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("hints", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::LeafReader;
    use crate::router::PathRouter;

    #[test]
    fn resolve_registered_hint() {
        let mut registry = Registry::new();
        registry.register("users", || Box::new(PathRouter::new("user.xml")));
        registry.register("attachments", || Box::new(LeafReader::ignoring()));

        assert!(registry.contains("users"));
        assert!(registry.resolve("users").is_ok());
        assert!(registry.resolve("attachments").is_ok());
    }

    #[test]
    fn unknown_hint_errors() {
        let registry = Registry::new();
        let err = registry.resolve("gadgets").unwrap_err();
        assert!(matches!(err, RouteError::UnknownHint { hint } if hint == "gadgets"));
    }

    #[test]
    fn each_resolve_is_a_fresh_instance() {
        let mut registry = Registry::new();
        registry.register("users", || Box::new(PathRouter::new("user.xml")));

        // Two children of the same kind must not share state.
        let a = registry.resolve("users").unwrap();
        let b = registry.resolve("users").unwrap();
        let a_ptr: *const dyn Reader = a.as_ref();
        let b_ptr: *const dyn Reader = b.as_ref();
        assert_ne!(a_ptr.cast::<u8>(), b_ptr.cast::<u8>());
    }
}
