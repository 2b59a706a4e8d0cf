use std::path::Path;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceOffset};
use write_bitfonts::ParseError;

/// An error to be reported to the user, optionally pointing into a source file.
#[derive(Debug)]
pub struct ErrorReport {
    src: Option<NamedSource>,
    message: String,
    location: Option<LabeledSpan>,
}

impl Diagnostic for ErrorReport {
    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.src.as_ref().map(|x| x as _)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.location
            .as_ref()
            .map(|loc| Box::new(std::iter::once(loc.clone())) as _)
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ErrorReport {}

impl ErrorReport {
    pub fn message(message: impl Into<String>) -> Self {
        ErrorReport {
            src: None,
            message: message.into(),
            location: None,
        }
    }

    /// Report a BDF parse error, labelling the offending line.
    pub fn from_parse_error(error: &ParseError, path: &Path, text: String) -> Self {
        let line = error.line();
        let start = SourceOffset::from_location(&text, line, 1).offset();
        let len = text
            .lines()
            .nth(line.saturating_sub(1))
            .map(str::len)
            .unwrap_or_default();
        let location = LabeledSpan::new(Some(error.kind().to_string()), start, len);
        ErrorReport {
            message: format!("failed to parse '{}'", path.display()),
            src: Some(NamedSource::new(path.to_string_lossy(), text)),
            location: Some(location),
        }
    }

    /// The label attached to the source, if any.
    pub fn label(&self) -> Option<&str> {
        self.location.as_ref().and_then(LabeledSpan::label)
    }

    /// The labelled byte range in the source, if any.
    pub fn span(&self) -> Option<(usize, usize)> {
        self.location
            .as_ref()
            .map(|loc| (loc.offset(), loc.len()))
    }
}
