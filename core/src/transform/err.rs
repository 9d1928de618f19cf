use crate::error::{impl_stitch_error, Level};
use crate::location::{Location, Span};

/// Raised when a brace scan reaches the end of a file with a block still open.
#[derive(Debug, Clone)]
pub struct UnbalancedScanError {
    level: Level,
    message: String,
    issuer: String,
    location: Option<Location>,
    span: Option<Span>,
}

impl UnbalancedScanError {
    pub fn new(message: String, location: Location, span: Span) -> Self {
        UnbalancedScanError {
            level: Level::Critical,
            message,
            issuer: "stitch.transform.scanner".to_string(),
            location: Some(location),
            span: Some(span),
        }
    }
}

impl_stitch_error!(UnbalancedScanError);
