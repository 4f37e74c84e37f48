//! Error types for parameter table construction and updates.

/// Errors that can occur when declaring, looking up, or updating parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    /// A parameter with this name is already in the table.
    #[error("parameter '{0}' already declared")]
    DuplicateName(String),

    /// The declared kind is not one of Natural, Boolean, String or Section.
    #[error("parameter '{name}' has unknown kind '{kind}'")]
    UnknownParameterKind {
        /// The parameter being declared.
        name: String,
        /// The unrecognised kind.
        kind: String,
    },

    /// No parameter with this name exists.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// A value could not be converted to the parameter's kind.
    #[error("parameter '{name}' cannot hold {kind} value '{value}'")]
    InvalidValue {
        /// The parameter being assigned.
        name: String,
        /// The parameter's kind.
        kind: String,
        /// The rejected value.
        value: String,
    },
}
