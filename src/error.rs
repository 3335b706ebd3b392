//! Error types for the gpuhpc library

use std::io;
use thiserror::Error;

/// Status code for a device that matched no known generation or layout
pub const STATUS_UNKNOWN_DEVICE: i32 = 1;
/// Status code for a counter that the resolved generation cannot sample
pub const STATUS_INCOMPATIBLE_DEVICE: i32 = 2;
/// Status code for a failed host allocation
pub const STATUS_OUT_OF_HOST_MEMORY: i32 = 3;
/// Status code for an invalid caller argument
pub const STATUS_INVALID_PARAMETER: i32 = 4;

/// Main error type for counter sampling operations
#[derive(Error, Debug)]
pub enum HpcError {
    /// The GPU device node could not be opened or closed
    #[error("GPU device unavailable: {0}")]
    DeviceUnavailable(io::Error),

    /// The caller lacks access to the GPU device node
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The hardware identifier matched no known generation or layout
    #[error("Unknown GPU device (hardware id {hardware_id:#x})")]
    UnknownDevice {
        /// Identifier reported by the kernel driver
        hardware_id: u32,
    },

    /// The requested counter has no mapping for the resolved generation
    #[error("Counter {counter} is not supported on {generation}")]
    UnsupportedCounter {
        /// Hardware name of the counter
        counter: String,
        /// Display name of the resolved generation
        generation: String,
    },

    /// An activate, deactivate, read or query call failed in the driver
    #[error("IOCTL {request} failed: {source}")]
    IoctlFailure {
        /// Name of the request that failed
        request: &'static str,
        /// OS error reported by the driver
        #[source]
        source: io::Error,
    },

    /// The injected host allocator returned no memory
    #[error("Host allocation of {bytes} bytes failed")]
    OutOfHostMemory {
        /// Size of the rejected request
        bytes: usize,
    },

    /// The caller's output buffer cannot hold one value per counter
    #[error("Output buffer too small: need {needed} values, got {actual}")]
    BufferTooSmall {
        /// Number of counters in the context
        needed: usize,
        /// Length of the supplied buffer
        actual: usize,
    },

    /// Invalid parameter or configuration
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other I/O error
    #[error("I/O error: {0}")]
    Io(io::Error),
}

impl HpcError {
    /// Build an [`HpcError::IoctlFailure`] from the calling thread's last OS error
    pub fn last_ioctl_error(request: &'static str) -> Self {
        HpcError::IoctlFailure {
            request,
            source: io::Error::last_os_error(),
        }
    }

    /// Negative status code for callers that speak raw driver status values
    ///
    /// OS-level failures map to the negated errno; library-level failures map
    /// to the negated `STATUS_*` constants of this module.
    pub fn status_code(&self) -> i32 {
        match self {
            HpcError::DeviceUnavailable(err) | HpcError::Io(err) => negated_errno(err),
            HpcError::IoctlFailure { source, .. } => negated_errno(source),
            HpcError::PermissionDenied(_) => -libc::EACCES,
            HpcError::UnknownDevice { .. } => -STATUS_UNKNOWN_DEVICE,
            HpcError::UnsupportedCounter { .. } => -STATUS_INCOMPATIBLE_DEVICE,
            HpcError::OutOfHostMemory { .. } => -STATUS_OUT_OF_HOST_MEMORY,
            HpcError::BufferTooSmall { .. }
            | HpcError::InvalidParameter(_)
            | HpcError::Json(_) => -STATUS_INVALID_PARAMETER,
        }
    }
}

fn negated_errno(err: &io::Error) -> i32 {
    -err.raw_os_error().unwrap_or(libc::EIO)
}

impl From<io::Error> for HpcError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => HpcError::PermissionDenied(err.to_string()),
            io::ErrorKind::NotFound => HpcError::DeviceUnavailable(err),
            _ => HpcError::Io(err),
        }
    }
}

/// Result type for gpuhpc operations
pub type HpcResult<T> = std::result::Result<T, HpcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_are_negative() {
        let errors = [
            HpcError::UnknownDevice { hardware_id: 0x999 },
            HpcError::UnsupportedCounter {
                counter: "CP_ALWAYS_COUNT".to_string(),
                generation: "Adreno A5xx".to_string(),
            },
            HpcError::OutOfHostMemory { bytes: 64 },
            HpcError::BufferTooSmall { needed: 2, actual: 1 },
            HpcError::IoctlFailure {
                request: "PERFCOUNTER_READ",
                source: io::Error::from_raw_os_error(libc::EINVAL),
            },
        ];
        for err in &errors {
            assert!(err.status_code() < 0, "{err} should map to a negative status");
        }
    }

    #[test]
    fn test_ioctl_failure_keeps_errno() {
        let err = HpcError::IoctlFailure {
            request: "PERFCOUNTER_GET",
            source: io::Error::from_raw_os_error(libc::EBUSY),
        };
        assert_eq!(err.status_code(), -libc::EBUSY);
    }

    #[test]
    fn test_io_error_classification() {
        let denied: HpcError = io::Error::from(io::ErrorKind::PermissionDenied).into();
        assert!(matches!(denied, HpcError::PermissionDenied(_)));

        let missing: HpcError = io::Error::from(io::ErrorKind::NotFound).into();
        assert!(matches!(missing, HpcError::DeviceUnavailable(_)));
    }
}
