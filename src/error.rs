//! Error taxonomy for every directory operation.
//!
//! Each variant maps to one failure layer: transport (no usable response),
//! protocol (non-2xx status), service (`success:false` envelope), plus the
//! local pre-flight failures that never reach the network.

use std::collections::BTreeMap;

pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Field-level messages returned by the service, keyed by wire field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("Error de conexión: {0}")]
    Transport(String),

    #[error("Error {status}: {message}")]
    Protocol {
        status: u16,
        message: String,
        errors: Option<FieldErrors>,
    },

    #[error("{message}")]
    Service {
        message: String,
        errors: Option<FieldErrors>,
    },

    #[error("Cliente {0} no encontrado")]
    NotFound(i64),

    #[error("Campos requeridos vacíos: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("{0}")]
    InvalidArgument(String),
}

/// Payload-free classification of a [`DirectoryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Transport,
    Protocol,
    Service,
    NotFound,
    Validation,
    InvalidArgument,
}

impl DirectoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DirectoryError::Transport(_) => ErrorKind::Transport,
            DirectoryError::Protocol { .. } => ErrorKind::Protocol,
            DirectoryError::Service { .. } => ErrorKind::Service,
            DirectoryError::NotFound(_) => ErrorKind::NotFound,
            DirectoryError::Validation(_) => ErrorKind::Validation,
            DirectoryError::InvalidArgument(_) => ErrorKind::InvalidArgument,
        }
    }

    /// Server-reported field errors, when the failure carried any.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            DirectoryError::Protocol { errors, .. } | DirectoryError::Service { errors, .. } => {
                errors.as_ref()
            }
            _ => None,
        }
    }

    /// Builds a service failure, substituting a generic message when the server sent none.
    pub fn service(message: Option<String>, errors: Option<FieldErrors>) -> Self {
        DirectoryError::Service {
            message: message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "Error desconocido".to_string()),
            errors,
        }
    }
}

impl From<reqwest::Error> for DirectoryError {
    fn from(err: reqwest::Error) -> Self {
        DirectoryError::Transport(err.to_string())
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Protocol => "protocol",
            ErrorKind::Service => "service",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Validation => "validation",
            ErrorKind::InvalidArgument => "invalid_argument",
        };
        f.write_str(name)
    }
}
