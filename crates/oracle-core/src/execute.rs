use serde::{Deserialize, Serialize};

/// Outcome of running a request's task, produced by the processing chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExecuteResult {
    /// The task produced data.
    Success {
        /// Produced data.
        data: String,
        /// Exit status reported by the executor.
        status: i32,
    },
    /// The task failed.
    Error {
        /// Failure description.
        error: String,
        /// Exit status reported by the executor.
        status: i32,
    },
}

impl ExecuteResult {
    /// Builds a successful result.
    pub fn success(data: impl Into<String>, status: i32) -> Self {
        ExecuteResult::Success {
            data: data.into(),
            status,
        }
    }

    /// Builds a failed result.
    pub fn error(error: impl Into<String>, status: i32) -> Self {
        ExecuteResult::Error {
            error: error.into(),
            status,
        }
    }

    /// Produced data, if the execution succeeded.
    pub fn data(&self) -> Option<&str> {
        match self {
            ExecuteResult::Success { data, .. } => Some(data),
            ExecuteResult::Error { .. } => None,
        }
    }

    /// Returns true for the `Success` variant.
    pub fn is_success(&self) -> bool {
        matches!(self, ExecuteResult::Success { .. })
    }
}
