//! Non-fatal findings collected while resolving a syntax tree

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Diagnostic categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// Recognized construct the schema model does not represent
    Unsupported,
    /// Numeric literal that failed to convert; the field was left at zero
    Conversion,
    /// Syntax tree shape the resolver did not expect
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

/// Ordered collector of diagnostics
///
/// Every entry is also emitted as a `tracing` warning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unsupported(&mut self, message: impl Into<String>) {
        self.push(DiagnosticKind::Unsupported, message.into());
    }

    pub fn conversion(&mut self, message: impl Into<String>) {
        self.push(DiagnosticKind::Conversion, message.into());
    }

    pub fn internal(&mut self, message: impl Into<String>) {
        self.push(DiagnosticKind::Internal, message.into());
    }

    fn push(&mut self, kind: DiagnosticKind, message: String) {
        warn!(?kind, "{}", message);
        self.entries.push(Diagnostic { kind, message });
    }

    /// Append every entry of `other`, without re-logging them.
    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Entries of one kind, in recording order.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
