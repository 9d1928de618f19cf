use crate::error::{impl_stitch_error, Level};
use crate::location::{Location, Span};

/// A project (or one of its files) could not be fetched or parsed.
#[derive(Debug, Clone)]
pub struct RetrievalError {
    level: Level,
    message: String,
    issuer: String,
    location: Option<Location>,
    span: Option<Span>,
}

impl RetrievalError {
    pub fn new(message: String, issuer: String) -> Self {
        RetrievalError {
            level: Level::Critical,
            message,
            issuer,
            location: None,
            span: None,
        }
    }

    /// Retrieval errors about a specific file of a project point at it.
    pub fn in_file(message: String, issuer: String, file: &str) -> Self {
        RetrievalError {
            level: Level::Critical,
            message,
            issuer,
            location: Some(Location::new(file.to_string(), 0, 0)),
            span: None,
        }
    }
}

impl_stitch_error!(RetrievalError);

#[derive(Debug, Clone)]
pub struct PublicationError {
    level: Level,
    message: String,
    issuer: String,
    location: Option<Location>,
    span: Option<Span>,
}

impl PublicationError {
    pub fn new(message: String, issuer: String) -> Self {
        PublicationError {
            level: Level::Critical,
            message,
            issuer,
            location: None,
            span: None,
        }
    }
}

impl_stitch_error!(PublicationError);
