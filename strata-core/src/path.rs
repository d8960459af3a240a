//! Entry paths - '/'-separated relative paths for archive entries.
//!
//! Paths arrive already relative to the level that is routing them: the
//! parent strips its own prefix before forwarding, so a router only ever
//! sees `<hint>/<child-id>/<rest...>` or a bare filename at its level.
//!
//! `EntryPath` is zero-copy: it borrows the caller's string and all
//! splitting operations return sub-slices of the same buffer.

use memchr::memchr;

/// Separator byte between path segments.
pub const SEPARATOR: u8 = b'/';

/// A borrowed, '/'-separated relative entry path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPath<'a> {
    raw: &'a str,
}

impl<'a> EntryPath<'a> {
    /// Wrap a raw relative path. No normalization is performed.
    #[inline]
    pub fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    /// The underlying string.
    #[inline]
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// An empty path carries no routing information (forwarding the
    /// remainder of a two-segment path produces one).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Split off the first segment, returning it and the remainder.
    ///
    /// Returns `None` for an empty path or an empty leading segment
    /// (`"/x"`, `"//"` and friends are not valid relative paths).
    pub fn split_first(&self) -> Option<(&'a str, EntryPath<'a>)> {
        if self.raw.is_empty() {
            return None;
        }
        match memchr(SEPARATOR, self.raw.as_bytes()) {
            Some(0) => None,
            Some(idx) => Some((&self.raw[..idx], EntryPath::new(&self.raw[idx + 1..]))),
            None => Some((self.raw, EntryPath::new(""))),
        }
    }

    /// Split off the two leading routing segments: type hint and child
    /// identity, plus the remainder forwarded to the child.
    ///
    /// Returns `None` when either routing segment is missing or empty -
    /// the caller treats that as a malformed path.
    pub fn split_route(&self) -> Option<(&'a str, &'a str, EntryPath<'a>)> {
        let (hint, rest) = self.split_first()?;
        let (child_id, rest) = rest.split_first()?;
        Some((hint, child_id, rest))
    }

    /// Iterate over the segments of this path.
    pub fn segments(&self) -> Segments<'a> {
        Segments { rest: *self }
    }

    /// Number of segments. Empty path has zero.
    pub fn segment_count(&self) -> usize {
        self.segments().count()
    }

    /// A well-formed relative path has at least one segment, no empty
    /// segments, and no `.` / `..` components. Routers assume their
    /// input has already passed this check at the archive boundary.
    pub fn is_well_formed(&self) -> bool {
        if self.raw.is_empty() {
            return false;
        }
        let mut path = *self;
        loop {
            match path.split_first() {
                Some((seg, rest)) => {
                    if seg == "." || seg == ".." {
                        return false;
                    }
                    if rest.is_empty() {
                        // Reject trailing separator: "a/" splits to ("a", "")
                        // but so does "a" - distinguish via raw length.
                        return !path.raw.ends_with('/');
                    }
                    path = rest;
                }
                None => return false,
            }
        }
    }
}

impl std::fmt::Display for EntryPath<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.raw)
    }
}

/// Iterator over path segments.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: EntryPath<'a>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let (seg, rest) = self.rest.split_first()?;
        self.rest = rest;
        Some(seg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_first_single_segment() {
        let path = EntryPath::new("wiki.xml");
        let (seg, rest) = path.split_first().unwrap();
        assert_eq!(seg, "wiki.xml");
        assert!(rest.is_empty());
    }

    #[test]
    fn split_first_nested() {
        let path = EntryPath::new("users/alice/profile.xml");
        let (seg, rest) = path.split_first().unwrap();
        assert_eq!(seg, "users");
        assert_eq!(rest.as_str(), "alice/profile.xml");
    }

    #[test]
    fn split_first_empty() {
        assert_eq!(EntryPath::new("").split_first(), None);
    }

    #[test]
    fn split_first_leading_separator() {
        assert_eq!(EntryPath::new("/abs/path").split_first(), None);
    }

    #[test]
    fn split_route_full() {
        let path = EntryPath::new("users/alice/profile.xml");
        let (hint, child, rest) = path.split_route().unwrap();
        assert_eq!(hint, "users");
        assert_eq!(child, "alice");
        assert_eq!(rest.as_str(), "profile.xml");
    }

    #[test]
    fn split_route_exactly_two_segments() {
        let path = EntryPath::new("users/alice");
        let (hint, child, rest) = path.split_route().unwrap();
        assert_eq!(hint, "users");
        assert_eq!(child, "alice");
        assert!(rest.is_empty());
    }

    #[test]
    fn split_route_too_short() {
        assert_eq!(EntryPath::new("users").split_route(), None);
        assert_eq!(EntryPath::new("users/").split_route(), None);
        assert_eq!(EntryPath::new("").split_route(), None);
    }

    #[test]
    fn split_route_empty_segment() {
        assert_eq!(EntryPath::new("users//x").split_route(), None);
        assert_eq!(EntryPath::new("//").split_route(), None);
    }

    #[test]
    fn segment_count() {
        assert_eq!(EntryPath::new("").segment_count(), 0);
        assert_eq!(EntryPath::new("a").segment_count(), 1);
        assert_eq!(EntryPath::new("a/b/c").segment_count(), 3);
    }

    #[test]
    fn well_formed() {
        assert!(EntryPath::new("a/b/c").is_well_formed());
        assert!(EntryPath::new("file.txt").is_well_formed());
        assert!(!EntryPath::new("").is_well_formed());
        assert!(!EntryPath::new("/a").is_well_formed());
        assert!(!EntryPath::new("a/").is_well_formed());
        assert!(!EntryPath::new("a//b").is_well_formed());
        assert!(!EntryPath::new("a/../b").is_well_formed());
        assert!(!EntryPath::new("./a").is_well_formed());
    }
}
