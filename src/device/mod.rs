//! Device transports for GPU hardware counters
//!
//! A [`CounterDevice`] is one open kernel handle able to report its hardware
//! id and to program and read counter slots. The context owns it exclusively.

pub mod ioctl;
pub mod kgsl;
pub mod mali;

use std::fs;

use crate::counters::CounterSlot;
use crate::error::HpcResult;
use crate::mappings::GpuVendor;

pub use kgsl::KgslDevice;
pub use mali::MaliDevice;

/// One open GPU device handle
///
/// Every call maps to blocking driver requests; none is retried.
#[cfg_attr(test, mockall::automock)]
pub trait CounterDevice {
    /// Identifier the driver reports for the GPU model
    fn hardware_id(&self) -> HpcResult<u32>;

    /// Arm counting for `slot`
    fn activate(&mut self, slot: CounterSlot) -> HpcResult<()>;

    /// Disarm counting for `slot`
    fn deactivate(&mut self, slot: CounterSlot) -> HpcResult<()>;

    /// Read the raw value of every slot in one batch
    ///
    /// `values` has the same length as `slots`. Values are monotonic between
    /// reads unless the hardware resets.
    fn read(&mut self, slots: &[CounterSlot], values: &mut [u64]) -> HpcResult<()>;

    /// Release the handle
    fn close(self) -> HpcResult<()>;
}

/// Something that can open a [`CounterDevice`] exactly once
pub trait DeviceOpener {
    /// Device type produced on success
    type Device: CounterDevice;

    /// Open the device node
    fn open(self) -> HpcResult<Self::Device>;
}

impl<F, D> DeviceOpener for F
where
    F: FnOnce() -> HpcResult<D>,
    D: CounterDevice,
{
    type Device = D;

    fn open(self) -> HpcResult<D> {
        self()
    }
}

/// Find all GPU counter device nodes on the system
pub fn find_gpu_devices() -> Vec<String> {
    let mut devices = Vec::new();

    for i in 0..4 {
        let path = format!("/dev/kgsl-3d{}", i);
        if fs::metadata(&path).is_ok() {
            devices.push(path);
        }
    }

    for i in 0..10 {
        let path = format!("/dev/mali{}", i);
        if fs::metadata(&path).is_ok() {
            devices.push(path);
        }
    }

    devices
}

/// Find the first GPU counter device node
pub fn find_gpu_device() -> Option<String> {
    find_gpu_devices().into_iter().next()
}

/// Find the first device node driven by `vendor`
pub fn find_vendor_device(vendor: GpuVendor) -> Option<String> {
    find_gpu_devices()
        .into_iter()
        .find(|path| GpuVendor::from_device_path(path) == vendor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_found_nodes_have_known_vendor() {
        for path in find_gpu_devices() {
            assert_ne!(GpuVendor::from_device_path(&path), GpuVendor::Unknown, "{path}");
        }
    }

    #[test]
    #[serial]
    fn test_vendor_lookup_is_consistent() {
        if let Some(path) = find_vendor_device(GpuVendor::Adreno) {
            assert!(path.starts_with("/dev/kgsl-3d"));
        }
        if let Some(path) = find_vendor_device(GpuVendor::Mali) {
            assert!(path.starts_with("/dev/mali"));
        }
    }

    #[test]
    fn test_closure_opener() {
        let opener = || -> HpcResult<MockCounterDevice> {
            let mut device = MockCounterDevice::new();
            device.expect_hardware_id().returning(|| Ok(640));
            Ok(device)
        };
        let device = opener.open().unwrap();
        assert_eq!(device.hardware_id().unwrap(), 640);
    }
}
