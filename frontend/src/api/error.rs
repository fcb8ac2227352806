use common::QueryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ErrorAction, ToastInfo, ToastKind};

#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Request never produced a response (offline, dns, cors, ...)
    #[error("Request failed: {0}")]
    Network(String),
    #[error("Server responded with status {status}")]
    Status { status: u16 },
    #[error("Malformed response body: {0}")]
    Decode(String),
    #[error(transparent)]
    Query(#[from] QueryError),
    /// Implementation-specific
    #[error("Unknown error")]
    Unknown,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

impl ErrorAction for ApiError {
    fn should_log(&self) -> bool {
        match self {
            ApiError::Network(_)
            | ApiError::Status { .. }
            | ApiError::Decode(_)
            | ApiError::Unknown => true,
            ApiError::Query(_) => false,
        }
    }

    fn toast_info(&self) -> Option<ToastInfo> {
        match self {
            ApiError::Network(_) => Some(ToastInfo::new(
                "Backend unreachable",
                "check your connection and reload the page",
                ToastKind::Error,
            )),
            ApiError::Status { status } if *status >= 500 => Some(ToastInfo::new(
                "Server error",
                format!("the server failed with status {status}, try again later"),
                ToastKind::Error,
            )),
            ApiError::Status { status } => Some(ToastInfo::new(
                "Request rejected",
                format!("the server answered with status {status}"),
                ToastKind::Warn,
            )),
            ApiError::Decode(_) => Some(ToastInfo::new(
                "Unexpected data",
                "the server sent something we could not read",
                ToastKind::Error,
            )),
            ApiError::Query(err) => Some(ToastInfo::new(
                "Invalid page",
                err.to_string(),
                ToastKind::Info,
            )),
            ApiError::Unknown => Some(ToastInfo::new(
                "Error occurred!",
                "try reloading the page",
                ToastKind::Error,
            )),
        }
    }

    fn is_bug(&self) -> bool {
        match self {
            ApiError::Decode(_) | ApiError::Query(_) | ApiError::Unknown => true,
            ApiError::Network(_) | ApiError::Status { .. } => false,
        }
    }
}
