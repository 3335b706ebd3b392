//! Hardware generation classification for GPU counter sampling

pub mod adreno;
pub mod mali;

use std::fmt;

pub use adreno::{classify_adreno, AdrenoSeries};
pub use mali::{classify_mali, MaliFamily, MaliLayout};

/// Known GPU vendors supported by this library
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GpuVendor {
    /// ARM Mali GPUs
    Mali,
    /// Qualcomm Adreno GPUs
    Adreno,
    /// Unknown or unsupported vendor
    Unknown,
}

impl fmt::Display for GpuVendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuVendor::Mali => write!(f, "ARM Mali"),
            GpuVendor::Adreno => write!(f, "Qualcomm Adreno"),
            GpuVendor::Unknown => write!(f, "Unknown"),
        }
    }
}

impl GpuVendor {
    /// Guess the vendor from a kernel device node path
    pub fn from_device_path(path: &str) -> Self {
        let node = path.rsplit('/').next().unwrap_or(path);
        if node.starts_with("kgsl") {
            GpuVendor::Adreno
        } else if node.starts_with("mali") {
            GpuVendor::Mali
        } else {
            GpuVendor::Unknown
        }
    }
}

/// A closed classification of one vendor's GPU hardware variants
///
/// `classify` is total: identifiers that match nothing map to the vendor's
/// unknown variant instead of failing.
pub trait Generation: Copy + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Vendor whose identifiers this classification understands
    const VENDOR: GpuVendor;

    /// Classify a hardware identifier read from the kernel driver
    fn classify(hardware_id: u32) -> Self;

    /// Whether this is a recognized generation rather than the unknown sentinel
    fn is_known(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_from_device_path() {
        assert_eq!(GpuVendor::from_device_path("/dev/kgsl-3d0"), GpuVendor::Adreno);
        assert_eq!(GpuVendor::from_device_path("/dev/mali0"), GpuVendor::Mali);
        assert_eq!(GpuVendor::from_device_path("/dev/dri/renderD128"), GpuVendor::Unknown);
    }

    #[test]
    fn test_vendor_display() {
        assert_eq!(GpuVendor::Mali.to_string(), "ARM Mali");
        assert_eq!(GpuVendor::Adreno.to_string(), "Qualcomm Adreno");
    }
}
