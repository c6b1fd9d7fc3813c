/// Errors from the NVAPI driver layer.
use thiserror::Error;

use super::status::{NVAPI_END_ENUMERATION, NVAPI_OK, NvStatus, status_name};

/// Typed errors from loading and calling into `nvapi64.dll`.
#[derive(Debug, Error)]
pub enum NvapiError {
    /// The driver library could not be loaded (no NVIDIA driver installed).
    #[error("Failed to load {name}: {source}")]
    LibraryNotFound {
        /// File name of the library that was searched.
        name: &'static str,
        #[source]
        source: libloading::Error,
    },

    /// The library loaded but does not export the expected entry point.
    #[error("Failed to load `{symbol}`: {source}")]
    SymbolNotFound {
        /// Exported symbol name.
        symbol: &'static str,
        #[source]
        source: libloading::Error,
    },

    /// `nvapi_QueryInterface` returned null for a function id.
    #[error("Failed to load `{name}`")]
    FunctionUnavailable {
        /// NVAPI function name for the id that was queried.
        name: &'static str,
    },

    /// An NVAPI call returned a non-OK status.
    #[error("{call} failed: {} (status {status})", status_name(*status))]
    Status {
        /// NVAPI function that failed.
        call: &'static str,
        /// Raw `NvAPI_Status` value.
        status: NvStatus,
    },
}

impl NvapiError {
    /// Whether the error means the driver itself is missing or incomplete,
    /// as opposed to a call that was rejected.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, Self::Status { .. })
    }
}

/// Map a raw NVAPI status to `Ok(())` or a typed `NvapiError::Status`.
///
/// # Errors
///
/// Returns `Err(NvapiError::Status)` for any status other than `NVAPI_OK`.
pub fn check_status(status: NvStatus, call: &'static str) -> Result<(), NvapiError> {
    if status == NVAPI_OK {
        Ok(())
    } else {
        Err(NvapiError::Status { call, status })
    }
}

/// Map the status of one enumeration step.
///
/// `Ok(true)` means an item was produced, `Ok(false)` means the enumeration
/// is exhausted.
///
/// # Errors
///
/// Returns `Err(NvapiError::Status)` for any other non-OK status.
pub fn check_enumeration(status: NvStatus, call: &'static str) -> Result<bool, NvapiError> {
    if status == NVAPI_END_ENUMERATION {
        return Ok(false);
    }
    check_status(status, call).map(|()| true)
}
