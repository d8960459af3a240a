//! Traversal drivers - push ordered entry streams through a root reader.
//!
//! The core is push-based and source-agnostic: anything that can
//! produce `(relative path, byte stream)` pairs in document order can
//! feed it. This module covers the two common sources: an in-memory
//! (or adapter-provided) iterator, and a filesystem directory tree.
//!
//! Both drivers guarantee cleanup-on-abort: the root reader is closed
//! even when an entry fails, so every emitted begin event gets its end
//! event before the error surfaces.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::RouteError;
use crate::path::EntryPath;
use crate::router::{Context, Reader};

/// Push an ordered sequence of entries through `root`, then close it.
///
/// Processing is strictly sequential: each entry's `route` call runs to
/// completion before the next entry is taken from the iterator. The
/// first error aborts the stream; the root is still closed and the
/// error returned.
pub fn drive<I, P, R>(
    entries: I,
    root: &mut dyn Reader,
    ctx: &mut Context<'_>,
) -> Result<(), RouteError>
where
    I: IntoIterator<Item = (P, R)>,
    P: AsRef<str>,
    R: BufRead,
{
    let mut failure = None;
    for (path, mut content) in entries {
        let path = EntryPath::new(path.as_ref());
        if let Err(err) = root.route(path, &mut content, ctx) {
            failure = Some(err);
            break;
        }
    }
    let closed = root.close(ctx);
    match failure {
        Some(err) => Err(err),
        None => closed,
    }
}

/// Walk a directory tree in document order and push its files through
/// `root`, then close it.
///
/// Document order here is: the files of a directory first (sorted by
/// name, which puts a level's descriptor ahead of its children's
/// entries in the common layout), then its subdirectories (sorted by
/// name), recursively. Paths are made relative to `dir` with `/`
/// separators.
pub fn drive_dir(
    dir: &Path,
    root: &mut dyn Reader,
    ctx: &mut Context<'_>,
) -> Result<(), RouteError> {
    let mut rels = Vec::new();
    collect(dir, String::new(), &mut rels)?;

    let mut failure = None;
    for rel in &rels {
        let mut content = match File::open(dir.join(rel)) {
            Ok(file) => BufReader::new(file),
            Err(err) => {
                failure = Some(RouteError::Io(err));
                break;
            }
        };
        if let Err(err) = root.route(EntryPath::new(rel), &mut content, ctx) {
            failure = Some(err);
            break;
        }
    }
    let closed = root.close(ctx);
    match failure {
        Some(err) => Err(err),
        None => closed,
    }
}

/// Depth-first collection, files before subdirectories at each level.
fn collect(dir: &Path, prefix: String, out: &mut Vec<String>) -> io::Result<()> {
    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().into_string().map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidData, "non-utf8 file name")
        })?;
        if entry.file_type()?.is_dir() {
            dirs.push(name);
        } else {
            files.push(name);
        }
    }
    files.sort();
    dirs.sort();

    for name in files {
        out.push(join(&prefix, &name));
    }
    for name in dirs {
        let sub = dir.join(&name);
        collect(&sub, join(&prefix, &name), out)?;
    }
    Ok(())
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}
