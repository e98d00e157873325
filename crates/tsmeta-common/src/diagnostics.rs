use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

pub mod diagnostic_codes {
    /// A default value was not safely re-emittable.
    pub const SKIPPED_DEFAULT_VALUE: u32 = 100;
    /// A validation decorator argument was not safely re-emittable.
    pub const SKIPPED_VALIDATION_ARGUMENT: u32 = 101;
    /// Descriptor assembly failed for one property.
    pub const PROPERTY_ASSEMBLY_FAILED: u32 = 102;
    /// A class was not visited (not exported in collection mode, or anonymous).
    pub const SKIPPED_CLASS: u32 = 103;
}

/// A non-fatal note about something the pass skipped.
///
/// Notes never change the produced metadata; they only explain it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticNote {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    /// Class or `Class.property` the note is about.
    pub subject: String,
    pub message_text: String,
}

impl DiagnosticNote {
    pub fn message(
        file: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            category: DiagnosticCategory::Message,
            code,
            file: file.into(),
            subject: subject.into(),
            message_text: message.into(),
        }
    }

    pub fn warning(
        file: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            category: DiagnosticCategory::Warning,
            code,
            file: file.into(),
            subject: subject.into(),
            message_text: message.into(),
        }
    }
}

impl std::fmt::Display for DiagnosticNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) TSM{}: {}",
            self.file, self.subject, self.code, self.message_text
        )
    }
}
