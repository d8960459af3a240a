//! Routing errors.
//!
//! Every error here is fatal for the stream being processed: each one
//! signals either a structurally invalid archive or a missing
//! capability, and continuing past it would produce an unreliable
//! hierarchy. Nothing is retried or suppressed internally. Begin events
//! already emitted for ancestor levels are not retracted; a caller that
//! needs a terminated hierarchy after an error must still close the
//! root router.

use crate::descriptor::DescriptorError;

/// Fatal error raised while routing an archive entry.
#[derive(Debug)]
pub enum RouteError {
    /// A non-descriptor entry had fewer than the two segments required
    /// for delegation, or an empty routing segment.
    MalformedPath { path: String },

    /// The registry has no reader for the given type hint.
    UnknownHint { hint: String },

    /// The level's descriptor file could not be parsed.
    Descriptor(DescriptorError),

    /// Reading the entry's byte stream failed.
    Io(std::io::Error),
}

impl std::fmt::Display for RouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedPath { path } => {
                write!(f, "malformed entry path {path:?}: delegation requires <hint>/<child-id>/...")
            }
            Self::UnknownHint { hint } => {
                write!(f, "no reader registered for type hint {hint:?}")
            }
            Self::Descriptor(err) => write!(f, "descriptor parse failed: {err}"),
            Self::Io(err) => write!(f, "entry stream read failed: {err}"),
        }
    }
}

impl std::error::Error for RouteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Descriptor(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DescriptorError> for RouteError {
    fn from(err: DescriptorError) -> Self {
        Self::Descriptor(err)
    }
}

impl From<std::io::Error> for RouteError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_offender() {
        let err = RouteError::MalformedPath { path: "onlyone".to_string() };
        assert!(err.to_string().contains("onlyone"));

        let err = RouteError::UnknownHint { hint: "gadgets".to_string() };
        assert!(err.to_string().contains("gadgets"));
    }

    #[test]
    fn source_chain() {
        use std::error::Error;
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read");
        let err = RouteError::Io(io);
        assert!(err.source().is_some());
    }
}
