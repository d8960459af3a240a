//! Strata Core
//!
//! Streaming, path-driven demultiplexer for nested archive hierarchies.
//! Consumes an ordered sequence of `(relative path, byte stream)` pairs
//! and emits well-nested begin/end level events without buffering the
//! archive.
//!
//! # Architecture
//!
//! - **router.rs** - `Reader` contract and the `PathRouter` core
//! - **path.rs** - zero-copy `/`-separated entry paths
//! - **event.rs** - `Reference`, `EventSink`, recording sinks
//! - **descriptor.rs** - well-known per-level XML descriptor files
//! - **registry.rs** - type hint to reader-factory mapping
//! - **leaf.rs** - reader for levels of flat content files
//! - **driver.rs** - iterator and filesystem traversal drivers
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use strata_core::{drive, Context, LeafReader, PathRouter, Reader, Recorder, Registry};
//!
//! let mut registry = Registry::new();
//! registry.register("users", || Box::new(PathRouter::new("user.xml")));
//! registry.register("attachments", || Box::new(LeafReader::ignoring()));
//!
//! let mut recorder = Recorder::new();
//! let mut ctx = Context::new(&registry, &mut recorder);
//!
//! let mut root = PathRouter::new("folder.xml");
//! root.open("w0", None);
//! drive(
//!     vec![
//!         ("folder.xml", Cursor::new(&b"<folder><name>main</name></folder>"[..])),
//!         ("users/alice/user.xml", Cursor::new(&b"<user><name>Alice</name></user>"[..])),
//!         ("users/bob/user.xml", Cursor::new(&b"<user><name>Bob</name></user>"[..])),
//!     ],
//!     &mut root,
//!     &mut ctx,
//! )?;
//!
//! // begin(main), begin(Alice), end(Alice), begin(Bob), end(Bob), end(main)
//! assert_eq!(recorder.events().len(), 6);
//! # Ok::<(), strata_core::RouteError>(())
//! ```

pub mod descriptor;
pub mod driver;
pub mod error;
pub mod event;
pub mod leaf;
pub mod path;
pub mod registry;
pub mod router;

pub use descriptor::{Descriptor, DescriptorError};
pub use driver::{drive, drive_dir};
pub use error::RouteError;
pub use event::{Attributes, EventSink, LevelEvent, NullSink, Recorder, Reference};
pub use leaf::LeafReader;
pub use path::EntryPath;
pub use registry::Registry;
pub use router::{Context, PathRouter, Reader};
