use std::fmt;

/// Severity of an error, printed as the second field of the report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    pub const fn label(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Common surface of every error the stitcher can raise.
///
/// Errors are passed around as `Box<dyn StitchErrorExt>` so that retrieval,
/// transformation and publication failures travel through one `Result` type
/// up to the CLI, which renders them with [`crate::generate_error_report`].
pub trait StitchErrorExt: Send + Sync {
    fn level(&self) -> Level;
    fn message(&self) -> String;
    fn issuer(&self) -> String;
    fn span(&self) -> Option<crate::location::Span>;
    fn location(&self) -> Option<crate::location::Location>;
}

pub type StitchResult<T> = Result<T, Box<dyn StitchErrorExt>>;

/// `STITCH | level | location | issuer | span | message`
fn render(err: &dyn StitchErrorExt, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let location = err.location().map_or_else(|| "unknown".to_string(), |loc| loc.to_string());
    let span = err.span().map_or_else(|| "span:none".to_string(), |span| span.to_string());
    write!(
        f,
        "STITCH | {} | {} | {} | {} | {}",
        err.level(),
        location,
        err.issuer(),
        span,
        err.message()
    )
}

impl fmt::Debug for dyn StitchErrorExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, f)
    }
}

impl fmt::Display for dyn StitchErrorExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, f)
    }
}

/// Implements `Display`, `Error` and [`StitchErrorExt`] for an error struct
/// carrying `level`, `message`, `issuer`, `location` and `span` fields.
macro_rules! impl_stitch_error {
    ($ty:ty) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                if let Some(loc) = &self.location {
                    write!(f, "{} (at {})", self.message, loc)
                } else {
                    write!(f, "{}", self.message)
                }
            }
        }

        impl std::error::Error for $ty {}

        impl $crate::error::StitchErrorExt for $ty {
            fn level(&self) -> $crate::error::Level {
                self.level
            }

            fn message(&self) -> String {
                self.message.clone()
            }

            fn issuer(&self) -> String {
                self.issuer.clone()
            }

            fn span(&self) -> Option<$crate::location::Span> {
                self.span.clone()
            }

            fn location(&self) -> Option<$crate::location::Location> {
                self.location.clone()
            }
        }

        impl From<$ty> for Box<dyn $crate::error::StitchErrorExt> {
            fn from(err: $ty) -> Self {
                Box::new(err)
            }
        }
    };
}

pub(crate) use impl_stitch_error;

#[derive(Debug, Clone)]
pub struct ConfigError {
    level: Level,
    message: String,
    issuer: String,
    location: Option<crate::location::Location>,
    span: Option<crate::location::Span>,
}

impl ConfigError {
    pub fn new(message: String, issuer: String) -> Self {
        ConfigError {
            level: Level::Error,
            message,
            issuer,
            location: None,
            span: None,
        }
    }

    /// Config errors raised while reading a specific file point at it.
    pub fn in_file(message: String, issuer: String, file: &str) -> Self {
        ConfigError {
            level: Level::Error,
            message,
            issuer,
            location: Some(crate::location::Location::new(file.to_string(), 0, 0)),
            span: None,
        }
    }
}

impl_stitch_error!(ConfigError);

#[derive(Debug, Clone)]
pub struct FileError {
    level: Level,
    message: String,
    issuer: String,
    location: Option<crate::location::Location>,
    span: Option<crate::location::Span>,
}

impl FileError {
    pub fn new(message: String, issuer: String, file: &str) -> Self {
        FileError {
            level: Level::Error,
            message,
            issuer,
            location: Some(crate::location::Location::new(file.to_string(), 0, 0)),
            span: None,
        }
    }
}

impl_stitch_error!(FileError);
