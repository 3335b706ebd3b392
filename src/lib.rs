//! # gpuhpc - Hardware Performance Counters for Mobile GPUs
//!
//! Samples hardware performance counters of ARM Mali and Qualcomm Adreno
//! GPUs on Linux and Android through the vendor kernel drivers.
//!
//! ## Features
//!
//! - **Qualcomm Adreno** (A5xx, A6xx) via the KGSL perfcounter ioctls
//! - **ARM Mali** (Midgard, Bifrost, Valhall) via the kbase hwcnt reader
//! - **Generation-independent counter requests** encoded per device
//! - **Delta sampling**: every query reports activity since the last one
//! - **Injectable host allocator** for per-context arrays
//!
//! ## Quick Start
//!
//! ```no_run
//! use gpuhpc::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let counters = [AdrenoCounter::CpAlwaysCount, AdrenoCounter::SpBusyCycles];
//!     let mut ctx = open_adreno_context(&counters, None)?;
//!     ctx.start()?;
//!     std::thread::sleep(std::time::Duration::from_millis(100));
//!     let deltas = ctx.query_vec()?;
//!     println!("{:?}", deltas);
//!     ctx.destroy()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod alloc;
pub mod api;
pub mod config;
pub mod context;
pub mod counters;
pub mod delta;
pub mod device;
pub mod error;
pub mod mappings;

// Re-export main API for easy access
pub use alloc::{HostAllocator, HostBuffer, SystemAllocator};
pub use api::{collect_samples, describe_device, DeviceInfo, Sample};
#[cfg(feature = "adreno")]
pub use api::open_adreno_context;
#[cfg(feature = "mali")]
pub use api::open_mali_context;
pub use config::{SamplerConfig, Verbosity};
pub use context::{ContextState, SamplingContext};
pub use counters::{
    A6xxCounter, AdrenoCounter, Counter, CounterSlot, MaliBifrostCounter, MaliCounter, MaliValhallCounter,
};
pub use device::{CounterDevice, DeviceOpener, KgslDevice, MaliDevice};
pub use error::{HpcError, HpcResult};
pub use mappings::{classify_adreno, classify_mali, AdrenoSeries, Generation, GpuVendor, MaliFamily, MaliLayout};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Scan for GPU device nodes with a counter interface
///
/// # Example
///
/// ```no_run
/// for device in gpuhpc::scan_devices() {
///     println!("Found GPU device: {}", device);
/// }
/// ```
pub fn scan_devices() -> Vec<String> {
    device::find_gpu_devices()
}

/// Whether the system appears to have a GPU this library can talk to
pub fn is_supported() -> bool {
    !scan_devices().is_empty()
}

/// Get library version
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(version(), VERSION);
    }

    #[test]
    #[serial]
    fn test_is_supported_matches_scan() {
        assert_eq!(is_supported(), !scan_devices().is_empty());
    }
}

/// Prelude module for convenient imports
///
/// # Example
///
/// ```no_run
/// use gpuhpc::prelude::*;
///
/// let info = describe_device("/dev/kgsl-3d0")?;
/// println!("{} {}", info.vendor, info.generation);
/// # Ok::<(), HpcError>(())
/// ```
pub mod prelude {
    pub use crate::api::{collect_samples, describe_device, DeviceInfo, Sample};
    #[cfg(feature = "adreno")]
    pub use crate::api::open_adreno_context;
    #[cfg(feature = "mali")]
    pub use crate::api::open_mali_context;
    pub use crate::config::SamplerConfig;
    pub use crate::context::SamplingContext;
    pub use crate::counters::{AdrenoCounter, Counter, MaliCounter};
    pub use crate::error::{HpcError, HpcResult};
    pub use crate::mappings::{AdrenoSeries, GpuVendor, MaliLayout};
    pub use crate::{is_supported, scan_devices, version};
}
