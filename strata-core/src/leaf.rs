//! Leaf levels - containers of flat content files.
//!
//! Deep levels of an archive usually stop nesting and hold plain files
//! (bodies, attachments, blobs). A [`LeafReader`] implements the
//! [`Reader`] contract for such levels: it has no descriptor and no
//! children, every routed entry is handed as-is to a caller-provided
//! content handler, and it emits the usual begin/end pair around the
//! entries it sees.

use std::io::BufRead;

use crate::error::RouteError;
use crate::event::{Attributes, EventSink, Reference};
use crate::path::EntryPath;
use crate::router::{Context, Reader};

/// Callback invoked once per content entry at a leaf level, with the
/// level's reference and the entry's path relative to the level.
pub type ContentHandler =
    dyn FnMut(&Reference, &str, &mut dyn BufRead) -> std::io::Result<()>;

/// Reader for a level containing only content files.
pub struct LeafReader {
    reference: Reference,
    started: bool,
    closed: bool,
    handler: Box<ContentHandler>,
}

impl LeafReader {
    /// Create a leaf reader delivering content entries to `handler`.
    pub fn new<F>(handler: F) -> Self
    where
        F: FnMut(&Reference, &str, &mut dyn BufRead) -> std::io::Result<()> + 'static,
    {
        Self {
            reference: Reference::new("", None),
            started: false,
            closed: false,
            handler: Box::new(handler),
        }
    }

    /// A leaf reader that discards content and only contributes its
    /// begin/end pair to the hierarchy.
    pub fn ignoring() -> Self {
        Self::new(|_, _, _| Ok(()))
    }

    fn start(&mut self, sink: &mut dyn EventSink) {
        if !self.started {
            sink.begin_level(&self.reference, &Attributes::EMPTY);
            self.started = true;
        }
    }
}

impl Reader for LeafReader {
    fn open(&mut self, identity: &str, parent: Option<&Reference>) {
        self.reference = Reference::new(identity, parent);
    }

    fn route(
        &mut self,
        path: EntryPath<'_>,
        content: &mut dyn BufRead,
        ctx: &mut Context<'_>,
    ) -> Result<(), RouteError> {
        if path.is_empty() {
            return Ok(());
        }
        self.start(ctx.sink);
        (self.handler)(&self.reference, path.as_str(), content)?;
        Ok(())
    }

    fn close(&mut self, ctx: &mut Context<'_>) -> Result<(), RouteError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        if self.started {
            ctx.sink.end_level(&self.reference, &Attributes::EMPTY);
        }
        Ok(())
    }
}
