//! Markup conversion errors.

/// Error converting a document to storage format.
#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    /// The document's syntax has no registered converter.
    #[error("Not support {0} syntax yet")]
    UnsupportedSyntax(String),

    /// The converter produced no content.
    #[error("Can not parse this document.")]
    ConversionEmpty,

    /// The external converter program is not installed.
    #[error("{program} is required to convert this document. {hint}")]
    MissingDependency {
        /// Program that could not be started.
        program: String,
        /// Installation instructions shown to the user.
        hint: &'static str,
    },

    /// The external converter ran but failed.
    #[error("{program} failed: {stderr}")]
    ConverterFailed {
        /// Program that failed.
        program: String,
        /// Captured standard error.
        stderr: String,
    },

    /// A required header line is missing from the document.
    #[error("Missing \"{0}:\" line in the document header")]
    MissingMetadata(&'static str),

    /// I/O error talking to an external converter.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
