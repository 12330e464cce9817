//! Error types for route registration.

use thiserror::Error;

/// Errors produced while compiling a route template.
///
/// All of these are fatal at registration time: a malformed template must
/// abort startup rather than produce a route that can never match.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// A `{}` placeholder with no name.
    #[error("empty parameter name in route template: {template}")]
    EmptyParam {
        /// The offending template.
        template: String,
    },

    /// The same placeholder name appears more than once in one template.
    #[error("duplicate parameter {name:?} in route template: {template}")]
    DuplicateParam {
        /// The offending template.
        template: String,
        /// The repeated placeholder name.
        name: String,
    },

    /// A `{` with no closing `}` before the end of the template.
    #[error("unterminated parameter in route template: {template}")]
    UnterminatedParam {
        /// The offending template.
        template: String,
    },
}

/// Result type alias for route registration.
pub type Result<T> = std::result::Result<T, PatternError>;
