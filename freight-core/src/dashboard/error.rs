use thiserror::Error;

use crate::api::ApiError;

use super::state::Operation;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("{}: {}", .operation.failure_message(), .errors.join("; "))]
    Validation {
        operation: Operation,
        errors: Vec<String>,
    },

    #[error("unknown form field '{0}'")]
    UnknownField(String),

    #[error("{}: {source}", .operation.failure_message())]
    Api {
        operation: Operation,
        #[source]
        source: ApiError,
    },
}

impl DashboardError {
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Validation { operation, .. } | Self::Api { operation, .. } => Some(*operation),
            Self::UnknownField(_) => None,
        }
    }
}
