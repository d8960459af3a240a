//! Structural events - the core output of the demultiplexer.
//!
//! This is a SAX-style event model: a level's begin event is emitted the
//! first time the level is touched, its end event when the level closes.
//! Structure is represented purely by begin/end pairing; the sequence of
//! sink calls always forms a valid bracket sequence.
//!
//! These types are stable and hand-written.

/// Identity of one level in the output hierarchy, qualified by its
/// parent chain.
///
/// A reference starts out as the identity the parent supplied when it
/// opened the level ("alice" from `users/alice/...`) and may be replaced
/// by the authoritative name from the level's descriptor file before the
/// begin event is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    name: String,
    parent: Option<Box<Reference>>,
}

impl Reference {
    /// Create a reference under an optional parent. The parent chain is
    /// cloned; references are small and levels shallow.
    pub fn new(name: impl Into<String>, parent: Option<&Reference>) -> Self {
        Self {
            name: name.into(),
            parent: parent.cloned().map(Box::new),
        }
    }

    /// The level's own name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The enclosing level, if any.
    #[inline]
    pub fn parent(&self) -> Option<&Reference> {
        self.parent.as_deref()
    }

    /// Replace the name, keeping the parent chain. Used when a
    /// descriptor supplies the authoritative name for a level that was
    /// opened under a provisional identity.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Render the full location as `root/child/leaf`.
    pub fn location(&self) -> String {
        match &self.parent {
            Some(parent) => {
                let mut loc = parent.location();
                loc.push('/');
                loc.push_str(&self.name);
                loc
            }
            None => self.name.clone(),
        }
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.location())
    }
}

/// Event attributes. Always empty in the current design; the slot is
/// reserved so the sink contract does not change when level metadata is
/// added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Attributes;

impl Attributes {
    /// The empty attribute bag.
    pub const EMPTY: Attributes = Attributes;
}

/// Consumer of begin/end structural events.
///
/// Sinks observe structure; they cannot fail or apply backpressure. For
/// every `begin_level` there is exactly one matching `end_level`, begin
/// events arrive top-down and end events bottom-up.
pub trait EventSink {
    /// A level has come into scope.
    fn begin_level(&mut self, reference: &Reference, attributes: &Attributes);

    /// A level has gone out of scope.
    fn end_level(&mut self, reference: &Reference, attributes: &Attributes);
}

/// Sink that drops all events. Useful when only the routing side
/// effects (or errors) matter.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn begin_level(&mut self, _reference: &Reference, _attributes: &Attributes) {}
    fn end_level(&mut self, _reference: &Reference, _attributes: &Attributes) {}
}

/// One recorded structural event, by level name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelEvent {
    Begin(String),
    End(String),
}

/// Sink that records events in order. Primarily for tests and
/// debugging.
#[derive(Debug, Default)]
pub struct Recorder {
    events: Vec<LevelEvent>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events observed so far, in emission order.
    pub fn events(&self) -> &[LevelEvent] {
        &self.events
    }

    /// Consume the recorder, returning the event log.
    pub fn into_events(self) -> Vec<LevelEvent> {
        self.events
    }
}

impl EventSink for Recorder {
    fn begin_level(&mut self, reference: &Reference, _attributes: &Attributes) {
        self.events.push(LevelEvent::Begin(reference.name().to_string()));
    }

    fn end_level(&mut self, reference: &Reference, _attributes: &Attributes) {
        self.events.push(LevelEvent::End(reference.name().to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_location() {
        let root = Reference::new("main", None);
        let child = Reference::new("alice", Some(&root));
        let leaf = Reference::new("profile", Some(&child));
        assert_eq!(root.location(), "main");
        assert_eq!(child.location(), "main/alice");
        assert_eq!(leaf.location(), "main/alice/profile");
    }

    #[test]
    fn reference_rename_keeps_parent() {
        let root = Reference::new("main", None);
        let mut child = Reference::new("tmp", Some(&root));
        child.rename("alice");
        assert_eq!(child.name(), "alice");
        assert_eq!(child.location(), "main/alice");
    }

    #[test]
    fn recorder_orders_events() {
        let mut recorder = Recorder::new();
        let root = Reference::new("main", None);
        recorder.begin_level(&root, &Attributes::EMPTY);
        recorder.end_level(&root, &Attributes::EMPTY);
        assert_eq!(
            recorder.events(),
            &[
                LevelEvent::Begin("main".to_string()),
                LevelEvent::End("main".to_string()),
            ]
        );
    }
}
