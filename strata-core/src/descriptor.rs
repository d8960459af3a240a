//! Level descriptors - the well-known XML file at the top of each level.
//!
//! A descriptor is a small XML document whose root element carries
//! first-level children describing the level:
//!
//! ```xml
//! <folder>
//!   <name>inbox</name>
//!   <description>incoming mail</description>
//! </folder>
//! ```
//!
//! The root element name is not interpreted; only the `<name>` and
//! `<description>` children are captured. Everything else (nested
//! markup, unknown elements, attributes) is skipped so descriptor
//! schemas can grow without breaking the router.

use std::io::BufRead;

use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader as XmlReader;

/// Typed record parsed from a level's descriptor file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    /// Authoritative name of the level. `None` when the descriptor
    /// omits it or leaves it empty; the caller-supplied identity then
    /// stands.
    pub name: Option<String>,
    /// Free-form description, if present.
    pub description: Option<String>,
}

/// First-level children we capture.
enum Field {
    Name,
    Description,
}

impl Descriptor {
    /// Parse a descriptor from an entry's byte stream.
    ///
    /// Reads exactly one XML document from the stream; the stream is
    /// scoped to the entry by the traversal driver, so reading to
    /// document end never crosses into another entry's bytes.
    pub fn parse(input: &mut dyn BufRead) -> Result<Self, DescriptorError> {
        let mut reader = XmlReader::from_reader(input);
        reader.config_mut().trim_text(true);

        let mut descriptor = Descriptor::default();
        let mut buf = Vec::new();
        let mut depth = 0usize;
        let mut saw_root = false;
        let mut field: Option<Field> = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                XmlEvent::Start(start) => {
                    depth += 1;
                    if depth == 1 {
                        saw_root = true;
                    } else if depth == 2 {
                        field = match start.local_name().as_ref() {
                            b"name" => Some(Field::Name),
                            b"description" => Some(Field::Description),
                            _ => None,
                        };
                    }
                }
                XmlEvent::Text(text) => {
                    if depth == 2 {
                        if let Some(which) = &field {
                            let value = text
                                .unescape()
                                .map_err(quick_xml::Error::from)?
                                .into_owned();
                            match which {
                                Field::Name => descriptor.name = Some(value),
                                Field::Description => descriptor.description = Some(value),
                            }
                        }
                    }
                }
                XmlEvent::End(_) => {
                    if depth == 2 {
                        field = None;
                    }
                    depth = depth.saturating_sub(1);
                }
                XmlEvent::Empty(_) => {
                    // A self-closing element at depth zero is the root.
                    if depth == 0 {
                        saw_root = true;
                    }
                }
                XmlEvent::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !saw_root {
            return Err(DescriptorError::NoRoot);
        }

        // Empty name carries no identity - normalize so the router's
        // precedence rule only fires on a real name.
        if descriptor.name.as_deref() == Some("") {
            descriptor.name = None;
        }

        Ok(descriptor)
    }
}

/// Error parsing a descriptor file.
#[derive(Debug)]
pub enum DescriptorError {
    /// The XML itself is malformed (or the stream failed mid-read).
    Xml(quick_xml::Error),
    /// The document contains no root element.
    NoRoot,
}

impl std::fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Xml(err) => write!(f, "malformed descriptor xml: {err}"),
            Self::NoRoot => f.write_str("descriptor has no root element"),
        }
    }
}

impl std::error::Error for DescriptorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Xml(err) => Some(err),
            Self::NoRoot => None,
        }
    }
}

impl From<quick_xml::Error> for DescriptorError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Xml(err)
    }
}
