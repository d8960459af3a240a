//! The path router - routes archive entries and emits level structure.
//!
//! Each `PathRouter` instance handles exactly one level of the
//! hierarchy. An entry routed to it lands in one of three buckets:
//!
//! 1. the level's own descriptor file - parsed into a [`Descriptor`],
//!    whose name (when present) becomes the level's identity;
//! 2. a path below a child level - forwarded to the active child
//!    reader, creating or swapping that child when the child-identity
//!    segment changes;
//! 3. nothing else: a non-descriptor path that cannot be delegated is a
//!    structurally invalid archive and fails the whole stream.
//!
//! Routers form a chain whose depth tracks the path depth currently
//! being processed. Begin events are emitted top-down on first touch,
//! end events bottom-up on close.
//!
//! # Invariants
//! - `begin_level` fires at most once per instance, lazily, so a
//!   descriptor seen before any other entry can install its name first.
//! - `end_level` fires iff `begin_level` fired, on close.
//! - At most one child reader is alive under a parent; the old child is
//!   fully closed before a different one is opened.

use std::io::BufRead;

use crate::descriptor::Descriptor;
use crate::error::RouteError;
use crate::event::{Attributes, EventSink, Reference};
use crate::path::EntryPath;
use crate::registry::Registry;

/// Per-call routing environment: where child readers come from and
/// where structure events go.
///
/// Passing this by parameter (rather than capturing it in `open`) keeps
/// readers free of sink/registry lifetimes and lets one sink serve the
/// whole chain through a single mutable borrow.
pub struct Context<'a> {
    pub registry: &'a Registry,
    pub sink: &'a mut dyn EventSink,
}

impl<'a> Context<'a> {
    pub fn new(registry: &'a Registry, sink: &'a mut dyn EventSink) -> Self {
        Self { registry, sink }
    }
}

/// Contract shared by every level reader.
///
/// An instance is opened once, routed zero or more times in document
/// order, and closed once. `open` is pure initialization and emits
/// nothing; emission is deferred so a descriptor-derived name can
/// replace the provisional identity before the begin event goes out.
pub trait Reader {
    /// Initialize with a caller-supplied identity and the parent level's
    /// reference (None at the hierarchy root).
    fn open(&mut self, identity: &str, parent: Option<&Reference>);

    /// Route one entry whose `path` is relative to this level.
    fn route(
        &mut self,
        path: EntryPath<'_>,
        content: &mut dyn BufRead,
        ctx: &mut Context<'_>,
    ) -> Result<(), RouteError>;

    /// Close this level: cascade to the active child, then emit this
    /// level's end event if its begin event was ever emitted. Closing a
    /// never-touched level emits nothing. Closing twice is a no-op.
    fn close(&mut self, ctx: &mut Context<'_>) -> Result<(), RouteError>;
}

impl std::fmt::Debug for dyn Reader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Reader")
    }
}

/// Router for one hierarchical level with nested children.
pub struct PathRouter {
    /// Filename of this level's descriptor, e.g. `"folder.xml"`.
    descriptor_name: String,
    reference: Reference,
    started: bool,
    closed: bool,
    active_child_id: Option<String>,
    active_child: Option<Box<dyn Reader>>,
}

impl PathRouter {
    /// Create a router whose levels are described by the given
    /// well-known descriptor filename.
    pub fn new(descriptor_name: impl Into<String>) -> Self {
        Self {
            descriptor_name: descriptor_name.into(),
            reference: Reference::new("", None),
            started: false,
            closed: false,
            active_child_id: None,
            active_child: None,
        }
    }

    /// Current identity of this level.
    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    /// Whether the begin event has been emitted.
    pub fn started(&self) -> bool {
        self.started
    }

    fn start(&mut self, sink: &mut dyn EventSink) {
        if !self.started {
            sink.begin_level(&self.reference, &Attributes::EMPTY);
            self.started = true;
        }
    }

    fn end(&mut self, sink: &mut dyn EventSink) {
        if self.started {
            sink.end_level(&self.reference, &Attributes::EMPTY);
        }
    }

    /// Close the active child, if any, and release ownership.
    fn close_child(&mut self, ctx: &mut Context<'_>) -> Result<(), RouteError> {
        self.active_child_id = None;
        match self.active_child.take() {
            Some(mut child) => child.close(ctx),
            None => Ok(()),
        }
    }
}

impl Reader for PathRouter {
    fn open(&mut self, identity: &str, parent: Option<&Reference>) {
        self.reference = Reference::new(identity, parent);
    }

    fn route(
        &mut self,
        path: EntryPath<'_>,
        content: &mut dyn BufRead,
        ctx: &mut Context<'_>,
    ) -> Result<(), RouteError> {
        // A forwarded remainder can be empty when the parent path had
        // exactly the two routing segments; nothing to do at this level.
        if path.is_empty() {
            return Ok(());
        }

        if path.as_str() == self.descriptor_name {
            let descriptor = Descriptor::parse(content)?;
            if !self.started {
                // The descriptor's name is authoritative, but only until
                // the begin event is out: begin/end must agree.
                if let Some(name) = descriptor.name {
                    self.reference.rename(name);
                }
            }
            self.start(ctx.sink);
            return Ok(());
        }

        // Any non-descriptor entry also anchors this level, with
        // whatever identity is known so far.
        self.start(ctx.sink);

        let (hint, child_id, rest) = path.split_route().ok_or_else(|| {
            RouteError::MalformedPath { path: path.as_str().to_string() }
        })?;

        // Swap readers only when the child identity changes.
        if self.active_child_id.as_deref() != Some(child_id) {
            self.close_child(ctx)?;
            let mut child = ctx.registry.resolve(hint)?;
            child.open(child_id, Some(&self.reference));
            self.active_child = Some(child);
            self.active_child_id = Some(child_id.to_string());
        }

        match self.active_child.as_mut() {
            Some(child) => child.route(rest, content, ctx),
            None => Ok(()),
        }
    }

    fn close(&mut self, ctx: &mut Context<'_>) -> Result<(), RouteError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        // Emit this level's end even if the child's close failed, so the
        // sink never sees an unterminated level that did begin.
        let cascaded = self.close_child(ctx);
        self.end(ctx.sink);
        cascaded
    }
}
