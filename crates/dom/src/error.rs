use thiserror::Error;

/// A position in the parsed source, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// Computes line and column of a byte offset into `source`.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source.as_bytes()[..offset];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map(|p| p + 1)
            .unwrap_or(0);
        Location {
            line,
            column: offset - line_start + 1,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Error, Debug)]
pub enum DomError {
    #[error("XML syntax error at {location}: {message}")]
    Syntax { message: String, location: Location },

    #[error("Malformed document at {location}: {message}")]
    Malformed { message: String, location: Location },

    #[error("Unknown entity '&{entity};' at {location}")]
    UnknownEntity { entity: String, location: Location },

    #[error("Document has no root element")]
    NoRootElement,

    #[error("Failed to write document: {0}")]
    Write(String),
}

impl DomError {
    /// Where in the source the problem was detected, if known.
    pub fn location(&self) -> Option<Location> {
        match self {
            DomError::Syntax { location, .. }
            | DomError::Malformed { location, .. }
            | DomError::UnknownEntity { location, .. } => Some(*location),
            DomError::NoRootElement | DomError::Write(_) => None,
        }
    }
}
