//! Central error types for the driver.
//!
//! Constructors (adapter, device) fail with a [`ShimError`]; the factory turns
//! those into an `HRESULT` at the host boundary with [`ShimError::hresult`].

use thiserror::Error;

use dxgi_interop::{InteropError, HRESULT};

use crate::d3d9::types::{D3DERR_INVALIDCALL, D3DERR_NOTAVAILABLE};

/// Main error type for driver operations.
#[derive(Error, Debug)]
pub enum ShimError {
    /// The adapter has no output attached
    #[error("No monitors attached to adapter")]
    NoMonitor,

    /// Output descriptor or mode list query failed
    #[error("Failed to get display mode list: {0}")]
    ModeListFailed(String),

    /// Device + swap chain creation failed
    #[error("Failed to create D3D9 device: {0}")]
    DeviceCreateFailed(String),

    /// Back buffer 0 could not be retrieved from the swap chain
    #[error("Failed to retrieve back buffer: {0}")]
    BackBufferAcquireFailed(String),

    /// View creation for a surface failed
    #[error("Failed to create render target: {0}")]
    RenderTargetCreateFailed(String),

    /// A method that is not implemented yet was called
    #[error("Not supported: {method}")]
    NotSupported { method: &'static str },

    /// A compositor / device call failed
    #[error("Platform error: {0}")]
    Interop(#[from] InteropError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Log file or config file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl ShimError {
    pub fn not_supported(method: &'static str) -> Self {
        ShimError::NotSupported { method }
    }

    /// The result code a COM caller sees for this error.
    pub fn hresult(&self) -> HRESULT {
        match self {
            ShimError::NotSupported { .. }
            | ShimError::DeviceCreateFailed(_)
            | ShimError::BackBufferAcquireFailed(_)
            | ShimError::RenderTargetCreateFailed(_) => D3DERR_NOTAVAILABLE,
            ShimError::Interop(err) if err.code.is_err() => err.code,
            _ => D3DERR_INVALIDCALL,
        }
    }
}

impl From<serde_json::Error> for ShimError {
    fn from(err: serde_json::Error) -> Self {
        ShimError::Config(err.to_string())
    }
}

impl From<String> for ShimError {
    fn from(msg: String) -> Self {
        ShimError::Other(msg)
    }
}

impl From<&str> for ShimError {
    fn from(msg: &str) -> Self {
        ShimError::Other(msg.to_string())
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error, converting it to ShimError::Other.
    fn context(self, msg: &str) -> ShimResult<T>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F: FnOnce() -> String>(self, f: F) -> ShimResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn context(self, msg: &str) -> ShimResult<T> {
        self.map_err(|e| ShimError::Other(format!("{}: {}", msg, e)))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> ShimResult<T> {
        self.map_err(|e| ShimError::Other(format!("{}: {}", f(), e)))
    }
}

/// Extension trait for adding context to Option types.
pub trait OptionExt<T> {
    fn context(self, msg: &str) -> ShimResult<T>;

    fn with_context<F: FnOnce() -> String>(self, f: F) -> ShimResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn context(self, msg: &str) -> ShimResult<T> {
        self.ok_or_else(|| ShimError::Other(msg.to_string()))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> ShimResult<T> {
        self.ok_or_else(|| ShimError::Other(f()))
    }
}

/// Type alias for Results using ShimError.
pub type ShimResult<T> = Result<T, ShimError>;

#[cfg(test)]
mod tests {
    use super::*;
    use dxgi_interop::DXGI_ERROR_NOT_FOUND;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ShimError::NoMonitor.to_string(),
            "No monitors attached to adapter"
        );
        let err = ShimError::not_supported("Reset");
        assert_eq!(err.to_string(), "Not supported: Reset");
    }

    #[test]
    fn test_construction_errors_carry_messages() {
        let err = ShimError::DeviceCreateFailed("0x887A0001".to_string());
        assert!(err.to_string().contains("Failed to create D3D9 device"));
        assert!(err.to_string().contains("0x887A0001"));

        let err = ShimError::ModeListFailed("output gone".to_string());
        assert!(err.to_string().contains("display mode list"));
    }

    #[test]
    fn test_hresult_mapping() {
        assert_eq!(ShimError::not_supported("Reset").hresult(), D3DERR_NOTAVAILABLE);
        assert_eq!(
            ShimError::DeviceCreateFailed(String::new()).hresult(),
            D3DERR_NOTAVAILABLE
        );
        assert_eq!(ShimError::NoMonitor.hresult(), D3DERR_INVALIDCALL);

        let interop = InteropError::new("IDXGIAdapter::EnumOutputs", DXGI_ERROR_NOT_FOUND);
        assert_eq!(ShimError::from(interop).hresult(), DXGI_ERROR_NOT_FOUND);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ShimError = io_err.into();
        assert!(matches!(err, ShimError::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: ShimError = json_err.into();
        assert!(matches!(err, ShimError::Config(_)));
    }

    #[test]
    fn test_result_ext_context() {
        let result: Result<(), &str> = Err("original error");
        let msg = result.context("operation failed").unwrap_err().to_string();
        assert!(msg.contains("operation failed"));
        assert!(msg.contains("original error"));
    }

    #[test]
    fn test_result_ext_with_context() {
        let result: Result<(), &str> = Err("inner");
        let msg = result
            .with_context(|| format!("ctx-{}", 42))
            .unwrap_err()
            .to_string();
        assert!(msg.contains("ctx-42"));
        assert!(msg.contains("inner"));
    }

    #[test]
    fn test_option_ext_context() {
        let opt: Option<i32> = None;
        let result = opt.context("value was missing");
        assert!(matches!(result, Err(ShimError::Other(_))));

        assert_eq!(Some(42).context("should not appear").unwrap(), 42);
    }
}
