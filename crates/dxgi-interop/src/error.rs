use thiserror::Error;

use crate::foundation::HRESULT;

/// A failed compositor or device call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{call} failed: {code}")]
pub struct InteropError {
    /// Name of the platform entry point that failed.
    pub call: &'static str,
    pub code: HRESULT,
}

impl InteropError {
    pub fn new(call: &'static str, code: HRESULT) -> Self {
        Self { call, code }
    }
}

pub type InteropResult<T> = Result<T, InteropError>;
